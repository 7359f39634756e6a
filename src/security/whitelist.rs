//! Repository URL whitelist.
//!
//! # Responsibilities
//! - Hold the ordered list of configured glob patterns
//! - Decide whether a repository URL is allowed
//!
//! # Design Decisions
//! - Matching is lexical: URLs are never parsed or normalized
//! - Patterns are anchored to the full string and case-sensitive
//! - No regex; the matcher walks pattern and text once with single-star backtracking
//! - Empty pattern list denies everything

/// Ordered set of glob patterns a repository URL must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    patterns: Vec<String>,
}

impl Whitelist {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Configured patterns in their original order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if at least one pattern matches the whole URL.
    pub fn is_allowed(&self, repo_url: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| glob_match(pattern, repo_url))
    }
}

/// Shell-style glob match of `text` against `pattern`.
///
/// Supports `*` (any run, including `/`), `?` (one character) and
/// bracket classes (`[abc]`, `[a-z]`, `[!abc]`). An unterminated `[`
/// matches a literal `[`.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // Pattern index just past the last `*`, and the text index it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() {
            match pattern[p] {
                '*' => {
                    star = Some((p + 1, t));
                    p += 1;
                    continue;
                }
                '?' => {
                    p += 1;
                    t += 1;
                    continue;
                }
                '[' => match match_class(&pattern, p, text[t]) {
                    Some((true, next)) => {
                        p = next;
                        t += 1;
                        continue;
                    }
                    Some((false, _)) => {}
                    None => {
                        if text[t] == '[' {
                            p += 1;
                            t += 1;
                            continue;
                        }
                    }
                },
                c => {
                    if c == text[t] {
                        p += 1;
                        t += 1;
                        continue;
                    }
                }
            }
        }

        match star {
            Some((star_p, star_t)) => {
                p = star_p;
                t = star_t + 1;
                star = Some((star_p, star_t + 1));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Evaluates the bracket class starting at `pattern[start] == '['`.
///
/// Returns `None` when the class is unterminated, otherwise whether `ch`
/// is accepted and the pattern index following the closing `]`.
fn match_class(pattern: &[char], start: usize, ch: char) -> Option<(bool, usize)> {
    let mut first = start + 1;
    let negate = pattern.get(first) == Some(&'!');
    if negate {
        first += 1;
    }

    // A `]` directly after the opening bracket is a member, not the terminator.
    let mut close = first;
    if pattern.get(close) == Some(&']') {
        close += 1;
    }
    while close < pattern.len() && pattern[close] != ']' {
        close += 1;
    }
    if close >= pattern.len() {
        return None;
    }

    let set = &pattern[first..close];
    let mut matched = false;
    let mut i = 0;
    while i < set.len() {
        if i + 2 < set.len() && set[i + 1] == '-' {
            if set[i] <= ch && ch <= set[i + 2] {
                matched = true;
            }
            i += 3;
        } else {
            if set[i] == ch {
                matched = true;
            }
            i += 1;
        }
    }

    Some((matched != negate, close + 1))
}
