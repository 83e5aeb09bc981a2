//! Text rendering of the generated postgresql.conf fragment

use crate::models::parameter::Parameter;

const DOCS_BASE_URL: &str = "https://www.postgresql.org/docs";
const NOT_APPLICABLE: &str = "N/A";

/// Render one setting as its comment block followed by `name = value`.
pub fn render_parameter(parameter: &Parameter) -> String {
    let a = &parameter.annotation;
    format!(
        "# Description: {}\n\
         # Default:     {}\n\
         # Limitations: {}\n\
         # Multipliers: {}\n\
         # Recommended: {}\n\
         # Reference:   {}{}\n\
         {} = {}\n\n",
        a.description,
        a.default,
        a.limitations.unwrap_or(NOT_APPLICABLE),
        a.multipliers.unwrap_or(NOT_APPLICABLE),
        a.recommended,
        DOCS_BASE_URL,
        a.reference,
        parameter.name,
        parameter.value,
    )
}

pub fn render_config(parameters: &[Parameter]) -> String {
    parameters.iter().map(render_parameter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parameter::{Annotation, SettingValue};

    fn sample() -> Parameter {
        Parameter {
            name: "checkpoint_segments",
            value: SettingValue::Integer(120),
            annotation: Annotation {
                description: "Maximum number of log file segments between WAL checkpoints.",
                default: "3".into(),
                limitations: Some("Higher values minimize IO but slow down crash recovery"),
                multipliers: None,
                recommended: "120".into(),
                reference: "/9.1/static/runtime-config-wal.html#GUC-CHECKPOINT-SEGMENTS",
            },
        }
    }

    #[test]
    fn test_render_parameter() {
        let expected = "\
# Description: Maximum number of log file segments between WAL checkpoints.
# Default:     3
# Limitations: Higher values minimize IO but slow down crash recovery
# Multipliers: N/A
# Recommended: 120
# Reference:   https://www.postgresql.org/docs/9.1/static/runtime-config-wal.html#GUC-CHECKPOINT-SEGMENTS
checkpoint_segments = 120

";
        assert_eq!(render_parameter(&sample()), expected);
    }

    #[test]
    fn test_render_config_joins_blocks() {
        let params = vec![sample(), sample()];
        let out = render_config(&params);
        assert_eq!(out.lines().count(), 16);
        assert_eq!(out.matches("checkpoint_segments = 120\n\n").count(), 2);
    }
}
