//! Is verbose mode statically known at a call site?

use regroup_core::VerboseResolution;

use super::FlagExpr;
use crate::config::AnalyzerConfig;

/// Resolve the verbose flag from the call's flags argument.
///
/// A missing argument means the dialect default, which is off.
pub fn resolve_verbose(flags: Option<&FlagExpr>, config: &AnalyzerConfig) -> VerboseResolution {
    let resolution = match flags {
        None => VerboseResolution::Off,
        Some(expr) => resolve(expr, config),
    };
    if resolution == VerboseResolution::Unknown {
        tracing::debug!(flags = ?flags.map(ToString::to_string), "verbose mode undecidable");
    }
    resolution
}

fn resolve(expr: &FlagExpr, config: &AnalyzerConfig) -> VerboseResolution {
    match expr {
        FlagExpr::Ref(name) => match config.flag_constant(name) {
            Some(constant) => config.is_verbose_name(constant).into(),
            None => VerboseResolution::Unknown,
        },
        FlagExpr::Int(value) => ((*value & config.verbose_bit) != 0).into(),
        FlagExpr::BitOr(lhs, rhs) => resolve(lhs, config).or(resolve(rhs, config)),
        FlagExpr::Opaque => VerboseResolution::Unknown,
    }
}
