//! Bounded-concurrency dispatch of product builds.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Runs `build` for every product with at most `max_concurrent` in flight.
///
/// Returns one output per input, in completion order. A limit of zero is
/// treated as one.
pub(super) async fn dispatch<'a, P, T, F, Fut>(
    products: &'a [P],
    max_concurrent: usize,
    build: F,
) -> Vec<T>
where
    F: FnMut(&'a P) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(products)
        .map(build)
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn never_exceeds_limit_and_yields_one_output_per_input() {
        let items: Vec<usize> = (0..100).collect();
        let in_flight = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        let mut outputs = dispatch(&items, 8, |n| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                *n
            }
        })
        .await;

        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= 8, "observed {peak} concurrent builds");
        assert!(peak > 1, "builds should overlap");

        outputs.sort_unstable();
        assert_eq!(outputs, items);
    }

    #[tokio::test]
    async fn zero_limit_still_processes() {
        let items = vec!["a", "b"];
        let outputs = dispatch(&items, 0, |s| async move { s.len() }).await;
        assert_eq!(outputs.len(), 2);
    }

    #[tokio::test]
    async fn empty_input_yields_nothing() {
        let items: Vec<u8> = Vec::new();
        let outputs = dispatch(&items, 8, |b| async move { *b }).await;
        assert!(outputs.is_empty());
    }
}
