//! Variable substitution for command templates
//!
//! Fills the `${name:type}` placeholders of a template from the single raw
//! "extra" string the user passed on the command line.

use crate::error::{TemplateError, TemplateResult};
use crate::runner::placeholder::{
    render, render_words, scan_placeholders, Placeholder, PlaceholderType,
};
use crate::runner::DiagnosticSink;

/// Result of substituting a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The rendered command
    pub command: String,
    /// Whether the template declared any placeholders (and so consumed the input)
    pub had_placeholders: bool,
}

/// Substitute user input into a command template
///
/// Every placeholder but the last takes one shell word from the front of
/// `extra`; the last one takes whatever remains. A template without
/// placeholders is returned unchanged, with a warning if input was given.
pub fn substitute(
    template: &str,
    extra: &str,
    sink: &dyn DiagnosticSink,
) -> TemplateResult<Substitution> {
    let placeholders = scan_placeholders(template);

    if placeholders.is_empty() {
        if !extra.trim().is_empty() {
            sink.warn(&format!(
                "Input '{}' passed as extra arguments: no variable placeholder found in '{}'",
                extra.trim(),
                template
            ));
        }
        return Ok(Substitution {
            command: template.to_string(),
            had_placeholders: false,
        });
    }

    if extra.trim().is_empty() {
        return Err(TemplateError::MissingInput {
            placeholder: placeholders[0].name.clone(),
        });
    }

    let mut rendered = Vec::with_capacity(placeholders.len());
    let mut rest = extra.trim();
    let last = placeholders.len() - 1;

    for (i, placeholder) in placeholders.iter().enumerate() {
        if rest.is_empty() {
            return Err(TemplateError::MissingInput {
                placeholder: placeholder.name.clone(),
            });
        }

        if i == last {
            rendered.push(render_remainder(rest, placeholder)?);
        } else {
            let (token, remainder) = next_word(rest)?;
            rendered.push(render(&token, placeholder)?);
            rest = remainder;
        }
    }

    Ok(Substitution {
        command: replace_spans(template, &placeholders, &rendered),
        had_placeholders: true,
    })
}

/// Render everything left of the input for the final placeholder
fn render_remainder(rest: &str, placeholder: &Placeholder) -> TemplateResult<String> {
    if placeholder.kind()? == PlaceholderType::Args {
        return Ok(render_words(&split_words(rest)?));
    }

    // A lone quoted word loses its quotes; anything else is taken as typed
    match split_words(rest) {
        Ok(words) if words.len() == 1 => render(&words[0], placeholder),
        _ => render(rest, placeholder),
    }
}

/// Split the first shell word off `input`
///
/// Returns the word with its quoting removed and the trimmed remainder.
fn next_word(input: &str) -> TemplateResult<(String, &str)> {
    let end = word_end(input);
    let mut words = split_words(&input[..end])?;
    let word = if words.is_empty() {
        String::new()
    } else {
        words.swap_remove(0)
    };
    Ok((word, input[end..].trim_start()))
}

/// Byte offset where the first (already left-trimmed) word of `input` ends
fn word_end(input: &str) -> usize {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_single => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            c if c.is_whitespace() && !in_single && !in_double => return i,
            _ => {}
        }
    }

    input.len()
}

/// Quote-aware word splitting
pub(crate) fn split_words(input: &str) -> TemplateResult<Vec<String>> {
    shell_words::split(input).map_err(|e| TemplateError::MalformedShellSyntax {
        input: input.to_string(),
        error: e.to_string(),
    })
}

/// Replace each placeholder span with its rendered text
fn replace_spans(template: &str, placeholders: &[Placeholder], rendered: &[String]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut cursor = 0;

    for (placeholder, text) in placeholders.iter().zip(rendered) {
        result.push_str(&template[cursor..placeholder.span.start]);
        result.push_str(text);
        cursor = placeholder.span.end;
    }
    result.push_str(&template[cursor..]);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RecordingSink;

    fn sub(template: &str, extra: &str) -> TemplateResult<String> {
        substitute(template, extra, &RecordingSink::default()).map(|s| s.command)
    }

    #[test]
    fn test_string_type_basic() {
        assert_eq!(sub("echo ${msg:string}", "hello").unwrap(), "echo \"hello\"");
        assert_eq!(
            sub("git commit -m ${message:string}", "fix: bug").unwrap(),
            "git commit -m \"fix: bug\""
        );
    }

    #[test]
    fn test_string_type_with_quotes() {
        assert_eq!(
            sub("echo ${text:string}", "He said \"hello\"").unwrap(),
            r#"echo "He said \"hello\"""#
        );
    }

    #[test]
    fn test_single_quoted_word_is_unwrapped() {
        assert_eq!(
            sub("git commit -m ${message:string}", "'fix: bug'").unwrap(),
            "git commit -m \"fix: bug\""
        );
    }

    #[test]
    fn test_raw_type() {
        assert_eq!(
            sub("git checkout ${branch:raw}", "main").unwrap(),
            "git checkout main"
        );
        assert_eq!(
            sub("git checkout ${branch:raw}", "feature/new-parser").unwrap(),
            "git checkout feature/new-parser"
        );
    }

    #[test]
    fn test_number_type() {
        assert_eq!(sub("sleep ${seconds:number}", "5").unwrap(), "sleep 5");
        assert_eq!(sub("sleep ${seconds:number}", "2.5").unwrap(), "sleep 2.5");
        assert_eq!(
            sub("sleep ${seconds:number}", "abc"),
            Err(TemplateError::InvalidNumber {
                placeholder: "seconds".to_string(),
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_args_type() {
        assert_eq!(
            sub("git add ${files:args}", "file1.txt file2.txt").unwrap(),
            "git add file1.txt file2.txt"
        );
        assert_eq!(
            sub("git add ${files:args}", "\"my file.txt\" other.txt").unwrap(),
            "git add 'my file.txt' other.txt"
        );
        assert_eq!(
            sub("git add ${files:args}", "'file with spaces.txt' 'another file.txt'").unwrap(),
            "git add 'file with spaces.txt' 'another file.txt'"
        );
    }

    #[test]
    fn test_multiple_placeholders_take_one_word_each() {
        assert_eq!(
            sub("git tag -a ${version:string} -m ${version:string}", "v1.0.0 v1.0.0").unwrap(),
            "git tag -a \"v1.0.0\" -m \"v1.0.0\""
        );
    }

    #[test]
    fn test_non_final_args_splits_its_word() {
        assert_eq!(
            sub(
                "docker run --name ${name:raw} -p ${port:number} -v ${volumes:args} ${image:string}",
                "myapp 8080 \"/data:/app /logs:/logs\" nginx"
            )
            .unwrap(),
            "docker run --name myapp -p 8080 -v /data:/app /logs:/logs \"nginx\""
        );
    }

    #[test]
    fn test_last_placeholder_takes_remainder() {
        assert_eq!(
            sub("deploy ${env:raw} ${note:string}", "prod ship it now").unwrap(),
            "deploy prod \"ship it now\""
        );
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(
            sub("echo ${message:string}", "  hello world  ").unwrap(),
            "echo \"hello world\""
        );
    }

    #[test]
    fn test_missing_type() {
        assert_eq!(
            sub("echo ${msg}", "hello"),
            Err(TemplateError::MissingType {
                placeholder: "msg".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_type() {
        assert!(matches!(
            sub("echo ${message:invalid}", "hello"),
            Err(TemplateError::InvalidType { .. })
        ));
    }

    #[test]
    fn test_no_placeholder_with_input_warns() {
        let sink = RecordingSink::default();
        let result = substitute("echo hello", "world", &sink).unwrap();
        assert_eq!(result.command, "echo hello");
        assert!(!result.had_placeholders);

        let warnings = sink.messages();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no variable placeholder found"));
        assert!(warnings[0].contains("passed as extra arguments"));
        assert!(!warnings[0].contains("ignored"));
    }

    #[test]
    fn test_no_placeholder_no_input_is_identity() {
        let sink = RecordingSink::default();
        for template in ["pytest", "echo 'a b' && ls", "echo $HOME", ""] {
            let result = substitute(template, "", &sink).unwrap();
            assert_eq!(result.command, template);
        }
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_missing_input() {
        assert_eq!(
            sub("echo ${message:string}", ""),
            Err(TemplateError::MissingInput {
                placeholder: "message".to_string()
            })
        );
        assert!(matches!(
            sub("echo ${message:string}", "   "),
            Err(TemplateError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_too_few_words_names_unmatched_placeholder() {
        assert_eq!(
            sub("cp ${from:raw} ${to:raw}", "a.txt"),
            Err(TemplateError::MissingInput {
                placeholder: "to".to_string()
            })
        );
    }

    #[test]
    fn test_unbalanced_quotes_in_input() {
        assert!(matches!(
            sub("cp ${from:raw} ${to:raw}", "'a.txt b.txt"),
            Err(TemplateError::MalformedShellSyntax { .. })
        ));
    }

    #[test]
    fn test_apostrophe_in_final_text() {
        assert_eq!(
            sub("git commit -m ${message:string}", "don't panic").unwrap(),
            "git commit -m \"don't panic\""
        );
        assert!(matches!(
            sub("git add ${files:args}", "don't"),
            Err(TemplateError::MalformedShellSyntax { .. })
        ));
    }

    #[test]
    fn test_next_word() {
        assert_eq!(next_word("a b c").unwrap(), ("a".to_string(), "b c"));
        assert_eq!(
            next_word("\"x y\" z").unwrap(),
            ("x y".to_string(), "z")
        );
        assert_eq!(next_word("it\\ s rest").unwrap(), ("it s".to_string(), "rest"));
        assert_eq!(next_word("last").unwrap(), ("last".to_string(), ""));
    }
}
