use thiserror::Error as ThisError;

/// Errors from the Sequence Builder (§4.F) and Runner (§4.G).
#[derive(Debug, ThisError)]
pub enum SequenceError {
    /// A single before/after repair sub-pass exceeded its iteration bound
    /// without reaching a fixed point (§4.F, scenario 6).
    #[error("sequence build loop detected: {pass} pass exceeded {limit} modifications")]
    BuildLoopDetected { pass: &'static str, limit: usize },

    /// The outer before/after alternation exceeded its iteration bound.
    #[error("sequence build did not converge after {limit} outer iterations")]
    BuildDidNotConverge { limit: usize },

    /// Priority inversions were recorded and `FAIL_ON_PRIO_OVERRIDE` is set.
    #[error("priority inversions detected: {0}")]
    PriorityInversion(String),

    /// The runner re-raises this when `ERROR` is set but no exception record
    /// was captured along the way (§4.G, §7).
    #[error("error during sequence")]
    UnspecifiedError,

    /// The runner re-raises the first captured handler fault wrapped in this
    /// variant, preserving its stage/message (§4.G, §7).
    #[error("handler fault in stage {stage}: {message}")]
    HandlerFault { stage: String, message: String },

    /// The runner re-raises the first captured Abort wrapped in this variant.
    #[error("aborted in stage {stage}: {message}")]
    Aborted { stage: String, message: String },
}
