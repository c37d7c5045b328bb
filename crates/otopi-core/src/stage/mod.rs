//! Stage Catalog (§4.B): a closed, static table of named phases.
//!
//! Unlike a registry of plugin-contributed `Stage` trait objects, this table
//! cannot grow at runtime — plugins bind handlers to one of these identifiers,
//! they never add new ones.
use std::fmt;

#[cfg(test)]
mod tests;

/// The closed set of stage identifiers (§3), in declared ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageId {
    Boot,
    Init,
    Setup,
    InternalPackages,
    Programs,
    LateSetup,
    Customization,
    Validation,
    TransactionBegin,
    EarlyMisc,
    Packages,
    Misc,
    TransactionEnd,
    Closeup,
    Cleanup,
    PreTerminate,
    Terminate,
    Reboot,
}

/// All stages in ordinal order. Also doubles as the iteration order the
/// Sequence Runner drives (§4.G).
pub const ALL_STAGES: &[StageId] = &[
    StageId::Boot,
    StageId::Init,
    StageId::Setup,
    StageId::InternalPackages,
    StageId::Programs,
    StageId::LateSetup,
    StageId::Customization,
    StageId::Validation,
    StageId::TransactionBegin,
    StageId::EarlyMisc,
    StageId::Packages,
    StageId::Misc,
    StageId::TransactionEnd,
    StageId::Closeup,
    StageId::Cleanup,
    StageId::PreTerminate,
    StageId::Terminate,
    StageId::Reboot,
];

impl StageId {
    /// Stable sort key; equal to this stage's position in [`ALL_STAGES`].
    pub fn ordinal(self) -> u32 {
        ALL_STAGES.iter().position(|s| *s == self).expect("exhaustive ALL_STAGES") as u32
    }

    pub fn display_name(self) -> &'static str {
        match self {
            StageId::Boot => "boot",
            StageId::Init => "init",
            StageId::Setup => "setup",
            StageId::InternalPackages => "internal-packages",
            StageId::Programs => "programs",
            StageId::LateSetup => "late-setup",
            StageId::Customization => "customization",
            StageId::Validation => "validation",
            StageId::TransactionBegin => "transaction-begin",
            StageId::EarlyMisc => "early-misc",
            StageId::Packages => "packages",
            StageId::Misc => "misc",
            StageId::TransactionEnd => "transaction-end",
            StageId::Closeup => "closeup",
            StageId::Cleanup => "cleanup",
            StageId::PreTerminate => "pre-terminate",
            StageId::Terminate => "terminate",
            StageId::Reboot => "reboot",
        }
    }

    /// When true, this stage and its remaining handlers are skipped once
    /// `ERROR` is set (§4.G). Cleanup/teardown stages are the exception:
    /// they run unconditionally so plugins get a chance to release resources
    /// (§5 "Resource acquisition").
    pub fn if_success(self) -> bool {
        !matches!(
            self,
            StageId::Cleanup | StageId::PreTerminate | StageId::Terminate | StageId::Reboot
        )
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
