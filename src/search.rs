use crate::Error;


/// Last index of every byte value in the pattern, -1 where absent.
fn bad_character_table(pattern: &[u8]) -> [isize; 256] {

    let mut last = [-1_isize; 256];

    for (i, &byte) in pattern.iter().enumerate() {
        last[byte as usize] = i as isize;
    }

    last
}


/// Finds every start offset of `pattern` in `text`, overlapping occurrences included,
/// using the Boyer-Moore bad-character rule.
///
/// An empty pattern is rejected. A pattern longer than the text matches nowhere.
pub fn search(text: &[u8], pattern: &[u8]) -> Result<Vec<usize>, Error> {

    if pattern.is_empty() {
        return Err(Error::InvalidArgument("search pattern must not be empty"));
    }

    let (n, m) = (text.len(), pattern.len());

    let mut occurrences = Vec::new();

    if m > n {
        return Ok(occurrences);
    }

    let last = bad_character_table(pattern);

    let mut shift = 0;

    while shift <= n - m {

        // Index one past the rightmost mismatch
        let mut j = m;
        while j > 0 && pattern[j - 1] == text[shift + j - 1] {
            j -= 1;
        }

        if j == 0 {

            occurrences.push(shift);

            // Align the byte after the match with its last occurrence in the pattern
            shift += if shift + m < n {
                (m as isize - last[text[shift + m] as usize]) as usize
            } else {
                1
            };

        } else {

            let mismatch = j - 1;
            let skip = mismatch as isize - last[text[shift + mismatch] as usize];

            shift += skip.max(1) as usize;
        }
    }

    Ok(occurrences)
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMatch {

    /// 1-based line number
    pub line: usize,
    /// 0-based byte offset within the line
    pub offset: usize

}


/// Occurrences of a pattern across the lines of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {

    pub occurrences: Vec<LineMatch>,
    /// Number of distinct lines with at least one occurrence
    pub matched_lines: usize,
    pub line_count: usize,
    /// Sum of the line lengths, line terminators excluded
    pub text_len: usize

}


/// Searches `pattern` in every line of `text`. Lines end at `\n`; a `\r` right before it is
/// not part of the line. Matches never span lines.
pub fn search_lines(text: &[u8], pattern: &[u8]) -> Result<SearchReport, Error> {

    if pattern.is_empty() {
        return Err(Error::InvalidArgument("search pattern must not be empty"));
    }

    let mut report = SearchReport::default();

    let mut lines: Vec<&[u8]> = text.split(|&b| b == b'\n').collect();

    // A trailing newline terminates the last line rather than starting a new one
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    for (i, line) in lines.into_iter().enumerate() {

        let line = line.strip_suffix(b"\r").unwrap_or(line);

        report.line_count += 1;
        report.text_len += line.len();

        let offsets = search(line, pattern)?;

        if !offsets.is_empty() {
            report.matched_lines += 1;
        }

        report.occurrences.extend(
            offsets.into_iter().map(|offset| LineMatch { line: i + 1, offset })
        );
    }

    log::debug!("{} occurrences in {} of {} lines",
        report.occurrences.len(), report.matched_lines, report.line_count);

    Ok(report)
}
