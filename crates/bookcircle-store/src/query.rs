//! Catalog filtering and sorting for the explore surface.

use bookcircle_shared::BookFormat;
use serde::{Deserialize, Serialize};

use crate::models::Book;
use crate::store::Store;
use crate::views::BookView;

/// Catalog filter. Every criterion is optional; unavailable books are
/// always excluded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilter {
    /// Case-insensitive substring match over title, author and
    /// description.
    pub search: Option<String>,
    pub format: Option<BookFormat>,
    /// Case-insensitive substring match on the genre.
    pub genre: Option<String>,
    /// Case-insensitive exact match on the language.
    pub language: Option<String>,
    /// Upper distance bound in kilometres. Only applied when
    /// `nearby_only` is set.
    pub max_distance_km: Option<f64>,
    /// When set, books without a known distance within the bound are
    /// excluded.
    pub nearby_only: bool,
}

impl BookFilter {
    fn matches(&self, book: &Book) -> bool {
        if !book.is_available {
            return false;
        }
        if let Some(q) = &self.search {
            let q = q.to_lowercase();
            let hit = book.title.to_lowercase().contains(&q)
                || book.author.to_lowercase().contains(&q)
                || book.description.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(format) = self.format {
            if book.format != format {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !book.genre.to_lowercase().contains(&genre.to_lowercase()) {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if !book.language.eq_ignore_ascii_case(language) {
                return false;
            }
        }
        if self.nearby_only {
            let bound = self.max_distance_km.unwrap_or(100.0);
            match book.distance_km {
                Some(d) if d <= bound => {}
                _ => return false,
            }
        }
        true
    }
}

/// Catalog orderings offered by the explore surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSort {
    /// Most recent listing first.
    #[default]
    Newest,
    /// Most liked first.
    MostPopular,
    /// Closest first; books without a distance sort as zero.
    Nearest,
    /// Highest-rated owner first.
    OwnerRating,
}

impl Store {
    /// Filtered, sorted catalog views.
    pub fn explore(&self, filter: &BookFilter, sort: BookSort) -> Vec<BookView> {
        let mut result: Vec<BookView> = self
            .graph()
            .catalog
            .iter()
            .filter_map(|id| self.graph().books.get(id))
            .filter(|b| filter.matches(b))
            .filter_map(|b| self.book(b.id))
            .collect();

        match sort {
            BookSort::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            BookSort::MostPopular => result.sort_by(|a, b| b.likes.cmp(&a.likes)),
            BookSort::Nearest => result.sort_by(|a, b| {
                let da = a.distance_km.unwrap_or(0.0);
                let db = b.distance_km.unwrap_or(0.0);
                da.total_cmp(&db)
            }),
            BookSort::OwnerRating => {
                result.sort_by(|a, b| b.owner.rating.total_cmp(&a.owner.rating))
            }
        }
        result
    }
}
