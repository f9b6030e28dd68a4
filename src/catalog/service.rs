//! Catalog queries. Every operation is a linear scan over a fixed list.

use std::collections::BTreeSet;

use super::data;
use super::error::CatalogError;
use super::types::{Accessory, AccessoryFilter, Game, GameFilter, PriceRange};

const FEATURED_GAMES: usize = 4;
const FEATURED_ACCESSORIES: usize = 3;

pub struct CatalogService {
    games: Vec<Game>,
    accessories: Vec<Accessory>,
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(data::games(), data::accessories())
    }
}

/// Lowercased, trimmed query or a validation error when blank.
fn search_needle(query: &str) -> Result<String, CatalogError> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CatalogError::Validation(
            "Search query is required".to_string(),
        ));
    }
    Ok(needle)
}

fn text_matches(needle: &str, name: &str, description: &str) -> bool {
    name.to_lowercase().contains(needle) || description.to_lowercase().contains(needle)
}

/// Highest rated first; `sort_by` is stable so ties keep catalog order.
fn top_rated<T: Clone>(items: &[T], rating: impl Fn(&T) -> f64, n: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| rating(b).total_cmp(&rating(a)));
    sorted.truncate(n);
    sorted
}

impl CatalogService {
    pub fn new(games: Vec<Game>, accessories: Vec<Accessory>) -> Self {
        Self { games, accessories }
    }

    // ------------------------------------------------------------------------
    // Games
    // ------------------------------------------------------------------------

    pub fn list_games(&self, filter: &GameFilter) -> Vec<Game> {
        self.games
            .iter()
            .filter(|g| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| g.category.eq_ignore_ascii_case(c))
            })
            .filter(|g| {
                filter
                    .platform
                    .as_deref()
                    .is_none_or(|p| g.platform.iter().any(|gp| gp == p))
            })
            .cloned()
            .collect()
    }

    pub fn get_game(&self, id: u64) -> Result<Game, CatalogError> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Game not found".to_string()))
    }

    pub fn game_categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.games.iter().map(|g| g.category.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn game_platforms(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .games
            .iter()
            .flat_map(|g| g.platform.iter().map(String::as_str))
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn featured_games(&self) -> Vec<Game> {
        top_rated(&self.games, |g| g.rating, FEATURED_GAMES)
    }

    pub fn search_games(&self, query: &str) -> Result<Vec<Game>, CatalogError> {
        let needle = search_needle(query)?;
        Ok(self
            .games
            .iter()
            .filter(|g| text_matches(&needle, &g.name, &g.description))
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------------
    // Accessories
    // ------------------------------------------------------------------------

    pub fn list_accessories(&self, filter: &AccessoryFilter) -> Vec<Accessory> {
        self.accessories
            .iter()
            .filter(|a| {
                filter
                    .category
                    .as_deref()
                    .is_none_or(|c| a.category.eq_ignore_ascii_case(c))
            })
            .filter(|a| {
                filter
                    .brand
                    .as_deref()
                    .is_none_or(|b| a.brand.eq_ignore_ascii_case(b))
            })
            .cloned()
            .collect()
    }

    pub fn get_accessory(&self, id: u64) -> Result<Accessory, CatalogError> {
        self.accessories
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound("Accessory not found".to_string()))
    }

    pub fn accessory_categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .accessories
            .iter()
            .map(|a| a.category.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn accessory_brands(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.accessories.iter().map(|a| a.brand.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    pub fn featured_accessories(&self) -> Vec<Accessory> {
        top_rated(&self.accessories, |a| a.rating, FEATURED_ACCESSORIES)
    }

    pub fn search_accessories(&self, query: &str) -> Result<Vec<Accessory>, CatalogError> {
        let needle = search_needle(query)?;
        Ok(self
            .accessories
            .iter()
            .filter(|a| text_matches(&needle, &a.name, &a.description))
            .cloned()
            .collect())
    }

    pub fn accessories_by_price(&self, range: &PriceRange) -> Vec<Accessory> {
        self.accessories
            .iter()
            .filter(|a| range.contains(a.price))
            .cloned()
            .collect()
    }
}
