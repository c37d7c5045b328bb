//! Sequence Runner (§4.G): drives the built [`Sequence`] stage by stage,
//! capturing handler faults instead of propagating them so later cleanup
//! stages still get a chance to run.
use log::{debug, info, warn};

use crate::environment::{ExceptionKind, ExceptionRecord};
use crate::kernel::bootstrap::Context;
use crate::kernel::error::Error as CoreError;
use crate::notify::NotifyEvent;
use crate::sequence::builder::Sequence;
use crate::sequence::error::SequenceError;
use crate::stage::ALL_STAGES;

/// Runs every stage in ordinal order, then re-raises the first captured
/// fault (if any) so the caller sees the root cause (§4.G, §7).
pub async fn run(ctx: &mut Context, sequence: &Sequence) -> Result<(), SequenceError> {
    for stage in ALL_STAGES {
        let if_success = stage.if_success();
        if if_success && ctx.environment().is_error() {
            debug!("skipping stage {stage}: ERROR already set");
            continue;
        }

        info!("Stage: {}", stage.display_name());

        for handler in sequence.stage(*stage) {
            if if_success && ctx.environment().is_error() {
                break;
            }

            let snapshot = ctx.environment().clone();

            if !handler.method.condition(&*ctx).await {
                debug!("{}: condition False", handler.qualified_name);
                continue;
            }

            if let Err(err) = handler.method.call(ctx).await {
                handle_failure(ctx, *stage, &handler.qualified_name, err).await?;
            }

            let diff = ctx.environment().diff(&snapshot);
            for line in diff {
                debug!("{line}");
            }
        }
    }

    if ctx.environment().is_error() {
        return Err(match ctx.environment().first_exception() {
            Some(record) if record.kind == ExceptionKind::Abort => {
                SequenceError::Aborted { stage: record.stage.clone(), message: record.message.clone() }
            }
            Some(record) => {
                SequenceError::HandlerFault { stage: record.stage.clone(), message: record.message.clone() }
            }
            None => SequenceError::UnspecifiedError,
        });
    }

    Ok(())
}

async fn handle_failure(
    ctx: &mut Context,
    stage: crate::stage::StageId,
    qualified_name: &str,
    err: CoreError,
) -> Result<(), SequenceError> {
    let (kind, message) = match &err {
        CoreError::Abort(message) => (ExceptionKind::Abort, message.clone()),
        other => (ExceptionKind::HandlerFault, other.to_string()),
    };

    let record = ExceptionRecord {
        kind,
        stage: stage.display_name().to_string(),
        message: message.clone(),
        stack_trace: format!("{err:?}"),
    };

    ctx.environment_mut().push_exception(record);

    if kind == ExceptionKind::Abort {
        warn!("{qualified_name} aborted in stage {stage}: {message}");
    } else {
        warn!("{qualified_name} failed in stage {stage}: {message}");
    }

    ctx.notify(NotifyEvent::Error)
        .await
        .map_err(|e| SequenceError::HandlerFault { stage: stage.display_name().to_string(), message: e.to_string() })
}
