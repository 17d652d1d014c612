//! Positional parameter substitution for message templates.
//!
//! Placeholders are `$1`, `$2`, ... and refer to 1-indexed parameters.
//! Substitution is plain text replacement: `$1` also matches the start of
//! `$10`, and a parameter value containing `$2` is itself subject to the
//! next step. Both are part of the rendered output contract.

/// How placeholders are discovered in a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Substitute `$1`, `$2`, ... in order and stop at the first index that
    /// does not occur in the message. A template using `$1` and `$3` but not
    /// `$2` only gets `$1` replaced.
    #[default]
    StopAtFirstGap,
    /// Substitute every index that has a parameter, regardless of gaps.
    /// Higher indices are replaced first so `$10` is not split by `$1`.
    AllIndices,
}

/// Policy used by [`render`] and by registries unless configured otherwise.
pub const DEFAULT_PLACEHOLDER_POLICY: PlaceholderPolicy = PlaceholderPolicy::StopAtFirstGap;

/// Renders message templates under a [`PlaceholderPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageRenderer {
    policy: PlaceholderPolicy,
}

impl MessageRenderer {
    #[must_use]
    pub const fn new(policy: PlaceholderPolicy) -> Self {
        Self { policy }
    }

    /// Substitute `params` into `template`.
    ///
    /// A placeholder without a matching parameter is left in the output
    /// literally.
    #[must_use]
    pub fn render<S: AsRef<str>>(&self, template: &str, params: &[S]) -> String {
        match self.policy {
            PlaceholderPolicy::StopAtFirstGap => render_contiguous(template, params),
            PlaceholderPolicy::AllIndices => render_all(template, params),
        }
    }
}

fn placeholder(index: usize) -> String {
    format!("${index}")
}

fn render_contiguous<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    let mut message = template.to_owned();
    for (index, param) in (1..).zip(params) {
        let token = placeholder(index);
        if !message.contains(&token) {
            return message;
        }
        message = message.replace(&token, param.as_ref());
    }
    // Out of parameters: any remaining `$n` stays literal.
    message
}

fn render_all<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    let mut message = template.to_owned();
    for (index, param) in params.iter().enumerate().rev() {
        message = message.replace(&placeholder(index + 1), param.as_ref());
    }
    message
}

/// Render with [`DEFAULT_PLACEHOLDER_POLICY`].
#[must_use]
pub fn render<S: AsRef<str>>(template: &str, params: &[S]) -> String {
    MessageRenderer::new(DEFAULT_PLACEHOLDER_POLICY).render(template, params)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn substitutes_positional_params() {
        assert_eq!(
            render("Value $1 not in $2", &["x", "set"]),
            "Value x not in set"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(render("$1 and $1 again", &["a"]), "a and a again");
    }

    #[test]
    fn missing_param_leaves_placeholder() {
        let empty: &[&str] = &[];
        assert_eq!(render("$1", empty), "$1");
        assert_eq!(render("Got $1 of $2", &["one"]), "Got one of $2");
    }

    #[test]
    fn extra_params_are_ignored() {
        assert_eq!(render("Only $1", &["a", "b", "c"]), "Only a");
    }

    #[test]
    fn stops_at_first_gap() {
        assert_eq!(render("$1 then $3", &["a", "b", "c"]), "a then $3");
    }

    #[test]
    fn plain_replacement_reaches_into_two_digit_placeholders() {
        let params = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        // `$10` starts with `$1`, which is replaced first.
        assert_eq!(render("$1 $10", &params), "a a0");
    }

    #[test]
    fn all_indices_fills_gaps() {
        let renderer = MessageRenderer::new(PlaceholderPolicy::AllIndices);
        assert_eq!(renderer.render("$1 then $3", &["a", "b", "c"]), "a then c");
    }

    #[test]
    fn all_indices_keeps_two_digit_placeholders_intact() {
        let renderer = MessageRenderer::new(PlaceholderPolicy::AllIndices);
        let params = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
        assert_eq!(renderer.render("$1 $10", &params), "a j");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        assert_eq!(render("Nothing to do", &["a"]), "Nothing to do");
    }
}
