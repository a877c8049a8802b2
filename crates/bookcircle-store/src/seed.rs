//! Built-in mock data the catalog is seeded with on every load.
//!
//! Seed entities use fixed ids (`Uuid::from_u128`) so that persisted
//! requests and chats referencing them still resolve after the catalog
//! is reseeded.

use std::collections::HashSet;

use bookcircle_shared::{BookFormat, BookId, UserId};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{Book, User};

fn seed_user_id(n: u128) -> UserId {
    UserId(Uuid::from_u128(n))
}

fn seed_book_id(n: u128) -> BookId {
    BookId(Uuid::from_u128(n))
}

fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    // Infallible for Utc with valid calendar dates.
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Mock book owners.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: seed_user_id(2),
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            avatar_url: "/placeholder.svg?height=40&width=40&text=SJ".to_string(),
            location: "New York, NY".to_string(),
            rating: 4.8,
            books_shared: 15,
            books_received: 12,
            joined_at: date(2024, 1, 10),
        },
        User {
            id: seed_user_id(3),
            name: "Mike Chen".to_string(),
            email: "mike@example.com".to_string(),
            avatar_url: "/placeholder.svg?height=40&width=40&text=MC".to_string(),
            location: "San Francisco, CA".to_string(),
            rating: 4.9,
            books_shared: 20,
            books_received: 18,
            joined_at: date(2024, 1, 5),
        },
        User {
            id: seed_user_id(4),
            name: "Emma Wilson".to_string(),
            email: "emma@example.com".to_string(),
            avatar_url: "/placeholder.svg?height=40&width=40&text=EW".to_string(),
            location: "London, UK".to_string(),
            rating: 4.7,
            books_shared: 8,
            books_received: 10,
            joined_at: date(2024, 1, 12),
        },
    ]
}

/// Mock catalog, newest listing first.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: seed_book_id(1),
            title: "The Great Gatsby".to_string(),
            author: "F. Scott Fitzgerald".to_string(),
            description: "A classic American novel about the Jazz Age".to_string(),
            format: BookFormat::Pdf,
            genre: "Classic Literature".to_string(),
            language: "English".to_string(),
            cover_url: "/placeholder.svg?height=300&width=200&text=The+Great+Gatsby".to_string(),
            owner_id: seed_user_id(2),
            likes: 24,
            liked_by: HashSet::new(),
            request_count: 8,
            distance_km: Some(2.5),
            created_at: date(2024, 1, 20),
            is_available: true,
        },
        Book {
            id: seed_book_id(2),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            description: "Epic science fiction novel set in a distant future".to_string(),
            format: BookFormat::Physical,
            genre: "Science Fiction".to_string(),
            language: "English".to_string(),
            cover_url: "/placeholder.svg?height=300&width=200&text=Dune".to_string(),
            owner_id: seed_user_id(3),
            likes: 42,
            liked_by: HashSet::new(),
            request_count: 15,
            distance_km: Some(15.2),
            created_at: date(2024, 1, 18),
            is_available: true,
        },
        Book {
            id: seed_book_id(3),
            title: "Sapiens".to_string(),
            author: "Yuval Noah Harari".to_string(),
            description: "A brief history of humankind".to_string(),
            format: BookFormat::Pdf,
            genre: "Non-fiction".to_string(),
            language: "English".to_string(),
            cover_url: "/placeholder.svg?height=300&width=200&text=Sapiens".to_string(),
            owner_id: seed_user_id(4),
            likes: 38,
            liked_by: HashSet::new(),
            request_count: 12,
            distance_km: Some(3000.0),
            created_at: date(2024, 1, 16),
            is_available: true,
        },
    ]
}
