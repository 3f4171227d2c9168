//! Request bodies and expected values sent by the steps

use serde_json::{json, Value};

/// Categories the backend ships with, in its own order
pub const KNOWN_CATEGORIES: [&str; 10] = [
    "Aksiyon",
    "RPG",
    "Strateji",
    "Macera",
    "Korku",
    "Simülasyon",
    "Spor",
    "Yarış",
    "Bulmaca",
    "Diğer",
];

/// How many leading known categories must be present
pub const REQUIRED_CATEGORY_COUNT: usize = 3;

pub const TEST_PASSWORD: &str = "TestPass123!";

pub const REVIEW_CATEGORY: &str = "Aksiyon";
pub const REVIEW_TITLE: &str = "Test Oyun İncelemesi";
pub const UPDATED_REVIEW_TITLE: &str = "Güncellenmiş Test İncelemesi";

/// AI answers at or below this many characters are treated as empty
pub const MIN_AI_TEXT_CHARS: usize = 10;

pub fn registration_body(run_id: &str) -> Value {
    json!({
        "email": format!("test_user_{run_id}@example.com"),
        "username": format!("testuser_{run_id}"),
        "password": TEST_PASSWORD,
    })
}

/// Login body whose email never matches the user registered in this run
pub fn mismatched_login_body(run_id: &str) -> Value {
    json!({
        "email": format!("nobody_{run_id}@example.com"),
        "password": TEST_PASSWORD,
    })
}

pub fn review_body() -> Value {
    json!({
        "title": REVIEW_TITLE,
        "content": "Bu bir test incelemesidir. Oyun çok güzel ve eğlenceli. Grafikleri harika, oynanış akıcı.",
        "game_name": "Test Game 2025",
        "category": REVIEW_CATEGORY,
        "tags": ["test", "aksiyon", "eğlenceli"],
    })
}

pub fn review_update_body() -> Value {
    json!({
        "title": UPDATED_REVIEW_TITLE,
        "content": "Bu içerik güncellendi. Yeni bilgiler eklendi.",
    })
}

pub fn comment_body() -> Value {
    json!({ "content": "Bu çok güzel bir inceleme! Teşekkürler." })
}

pub fn assist_body() -> Value {
    json!({
        "prompt": "Bu incelemeyi daha ilgi çekici hale getir",
        "context": "Oyun çok güzel. Grafikleri iyi.",
    })
}

pub fn explain_body() -> Value {
    json!({
        "word": "peak yapmak",
        "context": "Bu oyunda çok peak yaptım, gerçekten eğlenceliydi.",
    })
}
