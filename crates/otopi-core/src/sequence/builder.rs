//! Sequence Builder (§4.F): turns the flat list of registered handlers into
//! an ordered, per-stage sequence, honoring `priority` and symbolic
//! `before`/`after` constraints.
use std::collections::HashMap;

use log::warn;
use rand::seq::SliceRandom;

use crate::handler::HandlerMetadata;
use crate::kernel::constants::{SEQUENCE_BUILD_MAX_INNER_ITERATIONS, SEQUENCE_BUILD_MAX_OUTER_ITERATIONS};
use crate::sequence::error::SequenceError;
use crate::stage::{StageId, ALL_STAGES};

/// A fully-built sequence: handlers partitioned by stage, in final order.
#[derive(Clone)]
pub struct Sequence {
    by_stage: HashMap<StageId, Vec<HandlerMetadata>>,
}

impl Sequence {
    pub fn stage(&self, stage: StageId) -> &[HandlerMetadata] {
        self.by_stage.get(&stage).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds a [`Sequence`] from the flat handler list (§4.F.1-4).
///
/// `randomize` picks the initial tie-break: a shuffle instead of a
/// name sort. `fail_on_prio_override` promotes any recorded priority
/// inversion from a logged warning to a fatal [`SequenceError::PriorityInversion`].
pub fn build(
    mut handlers: Vec<HandlerMetadata>,
    randomize: bool,
    fail_on_prio_override: bool,
) -> Result<Sequence, SequenceError> {
    // Step 1: initial order.
    if randomize {
        handlers.shuffle(&mut rand::thread_rng());
    } else {
        handlers.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
    }
    handlers.sort_by_key(|h| h.priority);

    // Step 2: constraint resolution, alternating before/after sub-passes.
    let mut outer = 0;
    loop {
        if outer >= SEQUENCE_BUILD_MAX_OUTER_ITERATIONS {
            return Err(SequenceError::BuildDidNotConverge { limit: outer });
        }
        let before_changed = run_before_pass(&mut handlers)?;
        let after_changed = run_after_pass(&mut handlers)?;
        outer += 1;
        if !before_changed && !after_changed {
            break;
        }
    }

    // Step 3: bucket by stage, preserving relative order.
    let mut by_stage: HashMap<StageId, Vec<HandlerMetadata>> = HashMap::new();
    for stage in ALL_STAGES {
        by_stage.insert(*stage, Vec::new());
    }
    for handler in handlers {
        by_stage.entry(handler.stage).or_default().push(handler);
    }

    // Step 4: priority-inversion audit.
    let mut inversions = Vec::new();
    for stage in ALL_STAGES {
        let list = &by_stage[stage];
        for pair in list.windows(2) {
            let (m, m_next) = (&pair[0], &pair[1]);
            if m.priority > m_next.priority {
                inversions.push(format!(
                    "{} (priority {}) precedes {} (priority {}) in stage {}",
                    m.qualified_name, m.priority, m_next.qualified_name, m_next.priority, stage
                ));
            }
        }
    }
    if !inversions.is_empty() {
        let joined = inversions.join("; ");
        if fail_on_prio_override {
            return Err(SequenceError::PriorityInversion(joined));
        }
        warn!("priority inversions detected: {joined}");
    }

    Ok(Sequence { by_stage })
}

/// `before` sub-pass: repeatedly move each handler ahead of the earliest
/// handler it names in its `before` set, until a fixed point or the
/// iteration bound.
fn run_before_pass(list: &mut Vec<HandlerMetadata>) -> Result<bool, SequenceError> {
    let mut any_change = false;
    let mut modifications = 0;
    loop {
        let mut moved = false;
        for i in 0..list.len() {
            if list[i].before.is_empty() {
                continue;
            }
            let target = list
                .iter()
                .enumerate()
                .filter(|(_, h)| list[i].before.contains(&h.name))
                .map(|(k, _)| k)
                .min();
            if let Some(j) = target {
                if j < i {
                    let entry = list.remove(i);
                    list.insert(j, entry);
                    moved = true;
                    any_change = true;
                    modifications += 1;
                    break;
                }
            }
        }
        if !moved {
            break;
        }
        if modifications >= SEQUENCE_BUILD_MAX_INNER_ITERATIONS {
            return Err(SequenceError::BuildLoopDetected { pass: "before", limit: modifications });
        }
    }
    Ok(any_change)
}

/// `after` sub-pass: repeatedly move each handler just past the latest
/// handler it names in its `after` set, until a fixed point or the
/// iteration bound.
fn run_after_pass(list: &mut Vec<HandlerMetadata>) -> Result<bool, SequenceError> {
    let mut any_change = false;
    let mut modifications = 0;
    loop {
        let mut moved = false;
        for i in 0..list.len() {
            if list[i].after.is_empty() {
                continue;
            }
            let target = list
                .iter()
                .enumerate()
                .filter(|(_, h)| list[i].after.contains(&h.name))
                .map(|(k, _)| k)
                .max();
            if let Some(j) = target {
                if j > i {
                    // i < j, so removing at i first shifts the target down to j - 1;
                    // inserting the entry back at (pre-removal) index j lands it
                    // immediately after the target's new position.
                    let entry = list.remove(i);
                    list.insert(j, entry);
                    moved = true;
                    any_change = true;
                    modifications += 1;
                    break;
                }
            }
        }
        if !moved {
            break;
        }
        if modifications >= SEQUENCE_BUILD_MAX_INNER_ITERATIONS {
            return Err(SequenceError::BuildLoopDetected { pass: "after", limit: modifications });
        }
    }
    Ok(any_change)
}
