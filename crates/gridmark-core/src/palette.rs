//! Department Colorizer: one stable color per department

use ahash::AHashMap;

use crate::color::Color;
use crate::record::Department;

/// Number of distinct hues before colors repeat
pub const HUE_STEPS: usize = 12;

/// Saturation of department colors
pub const SATURATION: f64 = 0.8;

/// Value (brightness) of department colors
pub const VALUE: f64 = 0.9;

/// Color of the `n`-th department seen (zero-based)
pub fn department_color(n: usize) -> Color {
    let hue = n as f64 / HUE_STEPS as f64;
    Color::from_hsv(hue, SATURATION, VALUE)
}

/// Assigns colors to departments in first-seen order
///
/// The first department gets hue 0, the second hue 1/12, and so on. From the
/// thirteenth department on the hues wrap around, so departments twelve
/// apart share a color. A department keeps its color for the lifetime of
/// the table.
#[derive(Debug, Clone, Default)]
pub struct DepartmentColorTable {
    order: Vec<(Department, Color)>,
    index: AHashMap<Department, usize>,
}

impl DepartmentColorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `department`, assigning the next hue if it is new
    pub fn color_for(&mut self, department: &Department) -> Color {
        if let Some(&i) = self.index.get(department) {
            return self.order[i].1;
        }

        let n = self.order.len();
        let color = department_color(n);
        log::trace!("department {} gets color {}", department, color);
        self.order.push((department.clone(), color));
        self.index.insert(department.clone(), n);
        color
    }

    /// Color already assigned to `department`, if any
    pub fn get(&self, department: &Department) -> Option<Color> {
        self.index.get(department).map(|&i| self.order[i].1)
    }

    /// Number of departments seen
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no department has been seen yet
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Departments and their colors in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&Department, Color)> {
        self.order.iter().map(|(d, c)| (d, *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dept(key: &str) -> Department {
        Department::from_code(key).unwrap()
    }

    #[test]
    fn test_first_seen_order() {
        let mut table = DepartmentColorTable::new();
        let a = table.color_for(&dept("AA"));
        let b = table.color_for(&dept("BB"));
        let a_again = table.color_for(&dept("AA"));
        let c = table.color_for(&dept("CC"));

        assert_eq!(a, Color::rgb(229, 45, 45));
        assert_eq!(b, Color::rgb(229, 137, 45));
        assert_eq!(a, a_again);
        assert_eq!(c, department_color(2));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_order_decides_color() {
        let mut first = DepartmentColorTable::new();
        for key in ["AA", "BB", "AA", "CC"] {
            first.color_for(&dept(key));
        }
        let mut second = DepartmentColorTable::new();
        for key in ["AA", "CC", "BB"] {
            second.color_for(&dept(key));
        }

        assert_eq!(first.get(&dept("AA")), second.get(&dept("AA")));
        assert_eq!(first.get(&dept("BB")), second.get(&dept("CC")));
        assert_eq!(first.get(&dept("CC")), second.get(&dept("BB")));
        assert_eq!(first.get(&dept("ZZ")), None);
    }

    #[test]
    fn test_hues_wrap_after_twelve() {
        let mut table = DepartmentColorTable::new();
        let colors: Vec<_> = (0..13)
            .map(|i| table.color_for(&dept(&format!("{:02}", i))))
            .collect();
        assert_eq!(colors[0], colors[12]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn test_iter_in_first_seen_order() {
        let mut table = DepartmentColorTable::new();
        table.color_for(&dept("HR"));
        table.color_for(&dept("FI"));
        let keys: Vec<_> = table.iter().map(|(d, _)| d.as_str().to_string()).collect();
        assert_eq!(keys, vec!["HR", "FI"]);
    }
}
