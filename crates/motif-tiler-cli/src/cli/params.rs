//! Params command: show what a fill would use.

use anyhow::{Context, Result};

use motif_tiler::FieldSet;

use super::common::PatternArgs;

/// Print the effective parameters (defaults, `--params` file, flags) as a
/// JSON field set. The output can be fed back in with `--params`.
pub fn cmd_params(pattern: &PatternArgs) -> Result<()> {
    let base = pattern.base_fields()?;
    let fields = effective_fields(pattern, &base);
    let json = serde_json::to_string_pretty(&fields).context("Failed to serialize parameters")?;
    println!("{}", json);
    Ok(())
}

fn effective_fields(pattern: &PatternArgs, base: &FieldSet) -> FieldSet {
    pattern.parameters_for(base, None).save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_tiler::persist::keys;
    use motif_tiler::{FieldValue, PatternParameters};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_round_trip() {
        let fields = effective_fields(&PatternArgs::default(), &FieldSet::new());
        assert_eq!(fields, PatternParameters::default().save());
        assert_eq!(fields.get(keys::SCALE), Some(&FieldValue::Number(1.0)));
        assert_eq!(
            fields.get(keys::MOTIF_ANGLE_IS_RELATIVE_TO_PATTERN),
            Some(&FieldValue::Bool(true))
        );
    }

    #[test]
    fn clamped_flags_are_reported_clamped() {
        let args = PatternArgs {
            wobble: Some(3.0),
            angle: Some(180.0),
            ..PatternArgs::default()
        };
        let fields = effective_fields(&args, &FieldSet::new());
        assert_eq!(fields.number(keys::WOBBLE), Some(1.0));
        let angle = fields.number(keys::ANGLE).unwrap();
        assert!((angle - std::f64::consts::PI).abs() < 1e-12);
    }
}
