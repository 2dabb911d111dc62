//! Graph fuzzer - random request sequences against the engine
//!
//! Drives the rendezvous engine with randomized pub/sub traffic drawn
//! from a small identifier universe (small on purpose, so collisions,
//! re-publications, and deep paths happen constantly) and validates the
//! structural invariants after every handled request.

use meridian_core::{Fragment, FullId, NodeConfig, NodeLabel, Status, Strategy};
use meridian_rv::RendezvousEngine;
use meridian_wire::{control_identifier, RequestType, RvRequest};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fuzzer configuration
#[derive(Clone, Debug)]
pub struct FuzzerConfig {
    /// Number of participating hosts
    pub host_count: usize,
    /// Fragment values are drawn from `1..=fragment_universe`
    pub fragment_universe: u64,
    /// Maximum identifier depth in fragments
    pub max_depth: usize,
    /// Number of requests to generate
    pub op_count: usize,
    /// Probability of using a strategy other than the dominant one
    pub offbeat_strategy_prob: f64,
    /// Probability of generating a republish-shaped identifier
    pub republish_prob: f64,
    /// Random seed
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        FuzzerConfig {
            host_count: 5,
            fragment_universe: 4,
            max_depth: 3,
            op_count: 2_000,
            offbeat_strategy_prob: 0.05,
            republish_prob: 0.1,
            seed: 42,
        }
    }
}

impl FuzzerConfig {
    /// Light fuzzing for quick tests
    pub fn light() -> Self {
        FuzzerConfig {
            host_count: 3,
            fragment_universe: 3,
            max_depth: 2,
            op_count: 300,
            ..FuzzerConfig::default()
        }
    }

    /// Heavy fuzzing for thorough runs
    pub fn heavy() -> Self {
        FuzzerConfig {
            host_count: 10,
            fragment_universe: 6,
            max_depth: 4,
            op_count: 20_000,
            offbeat_strategy_prob: 0.1,
            ..FuzzerConfig::default()
        }
    }
}

/// Outcome of one fuzzing run
#[derive(Debug)]
pub struct FuzzResult {
    /// Requests handed to the engine
    pub ops: usize,
    /// Requests that returned `Success`
    pub accepted: usize,
    /// Requests rejected with a non-success status
    pub rejected: usize,
    /// Requests dropped at dispatch (malformed shape)
    pub dropped: usize,
    /// Outbound packets emitted over the whole run
    pub packets: usize,
    /// First invariant violation, if any
    pub violation: Option<String>,
}

impl FuzzResult {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// The fuzzer itself
pub struct GraphFuzzer {
    config: FuzzerConfig,
    engine: RendezvousEngine,
    rng: StdRng,
}

impl GraphFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        let cfg = NodeConfig::new(NodeLabel::from_u64(0xF0))
            .with_tm(NodeLabel::from_u64(0xF1))
            .with_internal_link_id(vec![0x01; 8])
            .with_broadcast_fid(vec![0xFF; 8]);
        GraphFuzzer {
            config,
            engine: RendezvousEngine::new(cfg),
            rng,
        }
    }

    pub fn engine(&self) -> &RendezvousEngine {
        &self.engine
    }

    fn random_fragment(&mut self) -> u64 {
        self.rng.gen_range(1..=self.config.fragment_universe)
    }

    fn random_path(&mut self) -> Vec<u64> {
        let depth = self.rng.gen_range(1..=self.config.max_depth);
        (0..depth).map(|_| self.random_fragment()).collect()
    }

    fn random_strategy(&mut self) -> Strategy {
        if self.rng.gen::<f64>() < self.config.offbeat_strategy_prob {
            Strategy::from_byte(self.rng.gen_range(0..6)).unwrap_or_default()
        } else {
            Strategy::DomainLocal
        }
    }

    fn random_request(&mut self) -> RvRequest {
        let op = match self.rng.gen_range(0..8) {
            0 => RequestType::PublishScope,
            1 => RequestType::PublishInfo,
            2 => RequestType::UnpublishScope,
            3 => RequestType::UnpublishInfo,
            4 => RequestType::SubscribeScope,
            5 => RequestType::SubscribeInfo,
            6 => RequestType::UnsubscribeScope,
            _ => RequestType::UnsubscribeInfo,
        };

        let path = self.random_path();
        let republish =
            op.is_publish() && path.len() >= 2 && self.rng.gen::<f64>() < self.config.republish_prob;

        let (id, prefix) = if republish {
            // existing path as the source, one fresh root as the parent
            (fragments(&path), fragments(&[self.random_fragment()]))
        } else {
            let (last, head) = path.split_last().unwrap();
            (fragments(&[*last]), fragments(head))
        };

        RvRequest::new(op, id, prefix, self.random_strategy())
    }

    /// Run the configured number of requests, validating after each.
    pub fn run(&mut self) -> FuzzResult {
        let mut result = FuzzResult {
            ops: 0,
            accepted: 0,
            rejected: 0,
            dropped: 0,
            packets: 0,
            violation: None,
        };

        for _ in 0..self.config.op_count {
            let issuer =
                NodeLabel::from_u64(0xA0 + self.rng.gen_range(0..self.config.host_count) as u64);
            let req = self.random_request();

            result.ops += 1;
            match self
                .engine
                .handle_publication(&control_identifier(issuer), &req.serialize())
            {
                Ok(Status::Success) => result.accepted += 1,
                Ok(_) => result.rejected += 1,
                Err(_) => result.dropped += 1,
            }
            result.packets += self.engine.drain_outgoing().len();

            if let Err(e) = self.engine.store().validate() {
                result.violation = Some(e.to_string());
                break;
            }
        }

        result
    }
}

fn fragments(values: &[u64]) -> FullId {
    FullId::from_fragments(&values.iter().map(|&v| Fragment::from_u64(v)).collect::<Vec<_>>())
}
