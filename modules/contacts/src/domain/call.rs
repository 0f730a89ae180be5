//! Simulated call outcomes.
//!
//! There is no telephony integration; a call is a uniformly random draw
//! over the four terminal outcomes, recorded to the log at a severity
//! matching its meaning.

use rand::Rng;
use tracing::{error, info, warn};

use crate::contract::model::{CallOutcome, Contact};

/// Pick a call outcome uniformly at random.
///
/// Takes any `Rng` so tests can pass a seeded generator.
pub fn choose_outcome<R: Rng + ?Sized>(rng: &mut R) -> CallOutcome {
    CallOutcome::ALL[rng.random_range(0..CallOutcome::ALL.len())]
}

/// Record the outcome of a simulated call against `contact`.
pub fn log_outcome(contact: &Contact, outcome: CallOutcome) {
    match outcome {
        CallOutcome::Connected => {
            info!("Call to {} connected successfully.", contact.name);
        }
        CallOutcome::Busy => {
            warn!("Call to {} failed: Line is busy.", contact.name);
        }
        CallOutcome::NoAnswer => {
            info!("Call to {} resulted in no answer.", contact.name);
        }
        CallOutcome::Failed => {
            error!("Call to {} failed unexpectedly.", contact.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn every_outcome_shows_up_and_nothing_else() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts: HashMap<CallOutcome, u32> = HashMap::new();

        for _ in 0..1000 {
            *counts.entry(choose_outcome(&mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 4, "all four outcomes should appear");
        for outcome in CallOutcome::ALL {
            assert!(counts[&outcome] > 0);
        }
        assert_eq!(counts.values().sum::<u32>(), 1000);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..50).map(|_| choose_outcome(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..50).map(|_| choose_outcome(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn status_strings_roundtrip() {
        for outcome in CallOutcome::ALL {
            assert_eq!(CallOutcome::from_status(outcome.as_str()), outcome);
        }
        // Anything unknown degrades to a failed call.
        assert_eq!(CallOutcome::from_status("carrier_lost"), CallOutcome::Failed);
    }
}
