mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::Deserialize;

use super::error::ApiError;

pub type ApiResponse<T> = Result<T, ApiError>;

#[derive(Deserialize)]
pub(crate) struct PageQuery {
    page: Option<i64>,
}

impl PageQuery {
    /// Listing pages are one-based; page 0 and below are out of range.
    pub(crate) fn page(&self) -> Result<i64, ApiError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::NotFound);
        }
        Ok(page)
    }
}
