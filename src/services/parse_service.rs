//! Turns comma-delimited text into question fragments.
//!
//! One question per line: `question,opt1,opt2,opt3,opt4,correct answer[,explanation]`.
//! Quoting is not understood, so a comma inside a field shifts every column after it.

use crate::models::question::{QuestionFragment, NO_MATCHING_ANSWER, OPTION_COUNT};

pub const MIN_COLUMNS: usize = 6;

pub fn parse_questions(text: &str) -> Vec<QuestionFragment> {
    let mut fragments = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        match parse_line(line) {
            Some(fragment) => fragments.push(fragment),
            None if !line.trim().is_empty() => skipped += 1,
            None => {}
        }
    }

    if skipped > 0 {
        tracing::debug!(
            parsed = fragments.len(),
            skipped,
            "Dropped lines with fewer than {} columns",
            MIN_COLUMNS
        );
    }
    fragments
}

/// Parses one row, or `None` when it has fewer than six columns.
pub fn parse_line(line: &str) -> Option<QuestionFragment> {
    let columns: Vec<&str> = line.split(',').map(str::trim).collect();
    if columns.len() < MIN_COLUMNS {
        return None;
    }

    let options: [String; OPTION_COUNT] = [
        columns[1].to_string(),
        columns[2].to_string(),
        columns[3].to_string(),
        columns[4].to_string(),
    ];
    let correct_answer = columns[5];
    let correct_answer_index = options
        .iter()
        .position(|o| o == correct_answer)
        .map(|i| i as i32)
        .unwrap_or(NO_MATCHING_ANSWER);

    Some(QuestionFragment {
        text: columns[0].to_string(),
        options,
        correct_answer_index,
        explanation: columns.get(6).map(|s| s.to_string()).unwrap_or_default(),
    })
}
