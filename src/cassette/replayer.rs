//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves a cassette's interactions in order, one queue per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Take the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the pair. An
    /// unexpected call is a test failure, never something to paper over.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Interaction {
        let key = (port.to_string(), method.to_string());
        match self.queues.get_mut(&key).and_then(VecDeque::pop_front) {
            Some(interaction) => interaction,
            None => {
                let mut available: Vec<String> = self
                    .queues
                    .iter()
                    .filter(|(_, queue)| !queue.is_empty())
                    .map(|((p, m), queue)| format!("{p}::{m} ({})", queue.len()))
                    .collect();
                available.sort();
                panic!(
                    "Cassette exhausted: no interactions left for port={port:?} method={method:?}. \
                     Remaining: [{}]",
                    available.join(", ")
                );
            }
        }
    }

    /// How many interactions are still queued for a port/method pair.
    #[must_use]
    pub fn remaining(&self, port: &str, method: &str) -> usize {
        self.queues.get(&(port.to_string(), method.to_string())).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!({}), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            server: "http://localhost:3000".into(),
            interactions,
        }
    }

    #[test]
    fn serves_each_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "links", "fetch_link", json!({"Ok": "first"})),
            interaction(1, "links", "update_link", json!({"Ok": "update"})),
            interaction(2, "links", "fetch_link", json!({"Ok": "second"})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("links", "update_link").seq, 1);
        assert_eq!(replayer.next_interaction("links", "fetch_link").output, json!({"Ok": "first"}));
        assert_eq!(replayer.remaining("links", "fetch_link"), 1);
        assert_eq!(
            replayer.next_interaction("links", "fetch_link").output,
            json!({"Ok": "second"})
        );
        assert_eq!(replayer.remaining("links", "fetch_link"), 0);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_queue_panics() {
        let cassette =
            make_cassette(vec![interaction(0, "rss", "delete_subscription", json!({"Ok": null}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("rss", "delete_subscription");
        let _ = replayer.next_interaction("rss", "delete_subscription");
    }

    #[test]
    #[should_panic(expected = "port=\"account\"")]
    fn unknown_pair_names_the_request() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_interaction("account", "delete_account");
    }
}
