/*!
Helpers pour tests async du pipeline

- Initialisation du logging (idempotente)
- Attente active d'une condition avec timeout
*/

use std::time::Duration;

/// Init logging pour tests, sans erreur si déjà fait
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Attend que `condition` devienne vraie, en la réévaluant toutes les 20ms.
/// Retourne `false` si le délai expire.
pub async fn wait_until<F>(timeout: Duration, mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    let start = tokio::time::Instant::now();

    while start.elapsed() < timeout {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let satisfied = condition();
    if !satisfied {
        log::warn!("⏰ Timeout after {:?} waiting for condition", timeout);
    }
    satisfied
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_wait_until_sees_background_progress() {
        init_logging();
        let counter = Arc::new(AtomicUsize::new(0));
        let bump = Arc::clone(&counter);
        tokio::spawn(async move {
            for _ in 0..3 {
                tokio::time::sleep(Duration::from_millis(10)).await;
                bump.fetch_add(1, Ordering::SeqCst);
            }
        });

        assert!(wait_until(Duration::from_secs(2), || counter.load(Ordering::SeqCst) == 3).await);
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        assert!(!wait_until(Duration::from_millis(60), || false).await);
    }
}
