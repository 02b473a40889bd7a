//! Row ordering for exported detail rows.
//!
//! Cells carry no type information, so a column compares numerically when
//! both cells parse as numbers and lexicographically otherwise.

use std::cmp::Ordering;

/// Compare two rows column by column; the first unequal column decides.
pub fn compare_rows(a: &[String], b: &[String], sort_columns: &[usize]) -> Ordering {
    for &column in sort_columns {
        let (left, right) = (&a[column], &b[column]);

        if let (Ok(x), Ok(y)) = (left.parse::<f64>(), right.parse::<f64>()) {
            match x.partial_cmp(&y) {
                Some(Ordering::Equal) | None => {}
                Some(ordering) => return ordering,
            }
        }

        match left.cmp(right) {
            Ordering::Equal => continue,
            ordering => return ordering,
        }
    }

    Ordering::Equal
}

/// Sort rows in place. Rows equal on every sort column keep their order.
///
/// `compare_rows` is not a total order once numeric and text cells mix in
/// one column, and `slice::sort_by` may panic on such comparators, so this
/// is a plain stable insertion sort.
pub fn sort_rows(rows: &mut [Vec<String>], sort_columns: &[usize]) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare_rows(&rows[j - 1], &rows[j], sort_columns) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }
}
