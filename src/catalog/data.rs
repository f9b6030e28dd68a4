//! Built-in storefront listings.

use super::types::{Accessory, Game};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn game(
    id: u64,
    name: &str,
    price: u32,
    category: &str,
    platform: &[&str],
    description: &str,
    image: &str,
    rating: f64,
) -> Game {
    Game {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        platform: strings(platform),
        description: description.to_string(),
        image: image.to_string(),
        rating,
        in_stock: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn accessory(
    id: u64,
    name: &str,
    price: u32,
    category: &str,
    brand: &str,
    description: &str,
    image: &str,
    rating: f64,
    features: &[&str],
) -> Accessory {
    Accessory {
        id,
        name: name.to_string(),
        price,
        category: category.to_string(),
        brand: brand.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        rating,
        in_stock: true,
        features: strings(features),
    }
}

pub fn games() -> Vec<Game> {
    const ALL: &[&str] = &["PS5", "Xbox", "PC"];
    vec![
        game(
            1,
            "FIFA 2024",
            299,
            "sports",
            ALL,
            "The latest edition of the famous football game",
            "fifa2024.jpg",
            4.8,
        ),
        game(
            2,
            "Call of Duty",
            399,
            "action",
            ALL,
            "The best-known action and war game",
            "cod.jpg",
            4.7,
        ),
        game(
            3,
            "Grand Theft Auto",
            249,
            "action",
            ALL,
            "An open world full of adventures",
            "gta.jpg",
            4.9,
        ),
        game(
            4,
            "Elden Ring",
            349,
            "rpg",
            ALL,
            "An epic RPG from the makers of Dark Souls",
            "eldenring.jpg",
            4.9,
        ),
        game(
            5,
            "Spider-Man 2",
            379,
            "action",
            &["PS5"],
            "The new adventures of Spider-Man",
            "spiderman2.jpg",
            4.8,
        ),
        game(
            6,
            "Forza Horizon 5",
            299,
            "racing",
            &["Xbox", "PC"],
            "The best open-world racing game",
            "forza5.jpg",
            4.7,
        ),
    ]
}

pub fn accessories() -> Vec<Accessory> {
    vec![
        accessory(
            1,
            "Pro Gaming Headset",
            199,
            "audio",
            "HyperX",
            "High quality headset with a detachable microphone",
            "headset.jpg",
            4.6,
            &["7.1 surround sound", "Detachable microphone", "Comfortable for long sessions"],
        ),
        accessory(
            2,
            "RGB Mechanical Keyboard",
            299,
            "input",
            "Razer",
            "Mechanical keyboard with customizable RGB lighting",
            "keyboard.jpg",
            4.8,
            &["Mechanical switches", "RGB lighting", "Water resistant"],
        ),
        accessory(
            3,
            "Precision Gaming Mouse",
            149,
            "input",
            "Logitech",
            "High precision mouse with programmable settings",
            "mouse.jpg",
            4.7,
            &["12000 DPI", "Programmable buttons", "Ergonomic design"],
        ),
        accessory(
            4,
            "Ergonomic Gaming Chair",
            899,
            "furniture",
            "DXRacer",
            "Comfortable gaming chair with lumbar support",
            "chair.jpg",
            4.5,
            &["Lumbar support", "Adjustable", "Premium leather"],
        ),
        accessory(
            5,
            "Curved Gaming Monitor",
            1299,
            "display",
            "Samsung",
            "27 inch curved 4K monitor",
            "monitor.jpg",
            4.9,
            &["4K resolution", "144Hz refresh rate", "Curved design"],
        ),
        accessory(
            6,
            "Wireless Controller",
            249,
            "controller",
            "Xbox",
            "Wireless controller compatible with PC and Xbox",
            "controller.jpg",
            4.8,
            &["Wireless connection", "Long battery life", "Advanced rumble"],
        ),
        accessory(
            7,
            "Pro Streaming Microphone",
            399,
            "audio",
            "Blue Yeti",
            "Professional microphone for streaming and recording",
            "microphone.jpg",
            4.7,
            &["Studio sound quality", "Multiple pickup patterns", "Easy to use"],
        ),
        accessory(
            8,
            "HD Webcam",
            179,
            "streaming",
            "Logitech",
            "High definition webcam for streaming and calls",
            "webcam.jpg",
            4.4,
            &["1080p resolution", "Autofocus", "Built-in microphone"],
        ),
    ]
}
