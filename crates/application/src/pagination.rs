//! Cursor driven accumulation of paged listings.

use std::future::Future;

use orgscope_core::{AppError, AppResult};

use crate::collector_ports::{Page, PageToken};

/// Records gathered by [`paginate_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResults<T> {
    /// Records of every page fetched, in service order.
    pub items: Vec<T>,
    /// Number of pages fetched successfully.
    pub pages: usize,
    /// Error that stopped pagination early, if any.
    pub error: Option<AppError>,
}

/// Fetches pages until the service stops returning a continuation.
///
/// Each page is requested exactly once. The first failing page ends the
/// listing; records from earlier pages are kept alongside the error.
pub async fn paginate_results<T, F, Fut>(mut fetch_page: F) -> PaginatedResults<T>
where
    F: FnMut(Option<PageToken>) -> Fut,
    Fut: Future<Output = AppResult<Page<T>>>,
{
    let mut items = Vec::new();
    let mut pages = 0_usize;
    let mut next_page = None;

    loop {
        match fetch_page(next_page.take()).await {
            Ok(page) => {
                pages = pages.saturating_add(1);
                items.extend(page.items);
                match page.next_page {
                    Some(token) => next_page = Some(token),
                    None => {
                        return PaginatedResults {
                            items,
                            pages,
                            error: None,
                        };
                    }
                }
            }
            Err(error) => {
                return PaginatedResults {
                    items,
                    pages,
                    error: Some(error),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orgscope_core::AppError;
    use tokio::sync::Mutex;

    use super::paginate_results;
    use crate::collector_ports::{Page, PageToken};

    #[tokio::test]
    async fn follows_tokens_until_last_page() {
        let requested = Arc::new(Mutex::new(Vec::new()));

        let results = paginate_results(|token: Option<PageToken>| {
            let requested = Arc::clone(&requested);
            async move {
                requested
                    .lock()
                    .await
                    .push(token.as_ref().map(|value| value.as_str().to_owned()));
                match token.as_ref().map(PageToken::as_str) {
                    None => Ok(Page::with_next(vec![1, 2], PageToken::new("2"))),
                    Some("2") => Ok(Page::with_next(vec![3], PageToken::new("3"))),
                    _ => Ok(Page::last(vec![4])),
                }
            }
        })
        .await;

        assert_eq!(results.items, vec![1, 2, 3, 4]);
        assert_eq!(results.pages, 3);
        assert!(results.error.is_none());
        assert_eq!(
            *requested.lock().await,
            vec![None, Some("2".to_owned()), Some("3".to_owned())]
        );
    }

    #[tokio::test]
    async fn failing_page_keeps_earlier_records() {
        let calls = Arc::new(Mutex::new(0_usize));

        let results = paginate_results(|token: Option<PageToken>| {
            let calls = Arc::clone(&calls);
            async move {
                *calls.lock().await += 1;
                match token {
                    None => Ok(Page::with_next(vec!["a", "b"], PageToken::new("2"))),
                    Some(_) => Err(AppError::Unavailable("connection reset".to_owned())),
                }
            }
        })
        .await;

        assert_eq!(results.items, vec!["a", "b"]);
        assert_eq!(results.pages, 1);
        assert_eq!(
            results.error,
            Some(AppError::Unavailable("connection reset".to_owned()))
        );
        assert_eq!(*calls.lock().await, 2);
    }
}
