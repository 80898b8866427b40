/// One-line paging summary with a continuation hint when more results exist.
pub fn paginate(shown: usize, total: u64, offset: u64) -> String {
    let mut line = format!("Showing {shown} of {total} results (offset: {offset}).");
    let next = offset.saturating_add(shown as u64);
    if total > next {
        line.push_str(&format!(" Use offset={next} to see more."));
    }
    line
}
