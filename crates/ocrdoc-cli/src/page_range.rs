/// Parse a page selection like "1,3-5" into sorted, unique 0-based indices.
///
/// Pages are numbered from 1 on the command line and must not exceed
/// `page_count`. Empty items are ignored.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (first, last) = match item.split_once('-') {
            Some((a, b)) => (page_number(a, page_count)?, page_number(b, page_count)?),
            None => {
                let n = page_number(item, page_count)?;
                (n, n)
            }
        };
        if first > last {
            return Err(format!("descending page range: '{item}'"));
        }
        pages.extend(first - 1..last);
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

/// Validate a single 1-based page number.
fn page_number(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pages_and_ranges() {
        assert_eq!(parse_page_range("3", 5).unwrap(), vec![2]);
        assert_eq!(parse_page_range("2-4", 5).unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_page_range("1,3-5", 5).unwrap(), vec![0, 2, 3, 4]);
    }

    #[test]
    fn duplicates_and_blanks_collapse() {
        assert_eq!(parse_page_range("2,,1-2, ", 5).unwrap(), vec![0, 1]);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(parse_page_range("0", 5).unwrap_err().contains("invalid"));
        assert!(parse_page_range("6", 5).unwrap_err().contains("exceeds"));
        assert!(parse_page_range("x", 5).unwrap_err().contains("invalid page number"));
        assert!(parse_page_range("4-2", 5).unwrap_err().contains("descending"));
    }

    #[test]
    fn whitespace_tolerance() {
        assert_eq!(parse_page_range(" 1 , 3 - 4 ", 5).unwrap(), vec![0, 2, 3]);
    }
}
