use crate::binder::read;
use crate::binder::BoundArguments;
use crate::error::ArgumentError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Recover from a failed scan by firing an alternate action found after the failure.
///
/// Only errors raised at a token position are recoverable.
/// The tokens following that position are searched for an exact alternate action alias; the first which reads
/// successfully redirects the invocation.
/// When none does, the original error is raised.
pub(crate) fn recover(
    scope: &mut BoundArguments,
    tokens: &[&str],
    error: ArgumentError,
) -> Result<(), ArgumentError> {
    let position = match error.context().position() {
        Some(position) if scope.func.is_none() => position,
        _ => return Err(error),
    };
    let signature = scope.signature;

    for (index, token) in tokens.iter().enumerate().skip(position + 1) {
        let id = match signature.aliases.get(*token) {
            Some(id) if signature.alternate.contains(id) => *id,
            _ => continue,
        };

        scope.skip = 0;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Attempting to recover from '{error}' with token {index} '{token}'.");
        }

        if read::read_argument(scope, tokens, index, id, token).is_ok() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Recovered with '{token}'.");
            }

            scope.unsatisfied.clear();
            return Ok(());
        }
    }

    Err(error)
}
