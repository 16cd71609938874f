//! Environment variable validation with helpful messages
//!
//! Invalid values never abort a run: the variable is ignored and a warning
//! naming the valid values (plus a typo suggestion when one is close) is
//! collected for the CLI to print.

/// Validator for one environment variable
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value; on failure record a warning and return `None`
    pub fn parse<T, F>(&self, value: &str, parser: F, warnings: &mut Vec<String>) -> Option<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let parsed = parser(value);
        if parsed.is_none() {
            warnings.push(format!(
                "invalid {} value '{}'{} (valid values: {})",
                self.var_name,
                value,
                self.suggest(value),
                self.valid_values.join(", ")
            ));
        }
        parsed
    }

    fn suggest(&self, value: &str) -> String {
        let input = value.to_lowercase();
        match closest(&input, self.valid_values) {
            Some(suggested) if suggested != input => format!(", did you mean '{}'?", suggested),
            _ => String::new(),
        }
    }
}

/// Closest candidate within two edits
pub fn closest<'c>(input: &str, candidates: &[&'c str]) -> Option<&'c str> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(input, c)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(c, _)| c)
}

/// Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let a_len = a_bytes.len();
    let b_len = b_bytes.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row: Vec<usize> = vec![0; b_len + 1];

    for (i, a_char) in a_bytes.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_bytes.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
