//! Single-select option control.

use catalog_core::catalog::Category;
use catalog_core::search::SortOption;

/// Label of the "no category" option.
pub const ALL_CATEGORIES: &str = "All Categories";

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption<T> {
    pub value: T,
    pub label: String,
}

impl<T> PickerOption<T> {
    /// Create an option.
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// A single-select control over a fixed option list.
///
/// Selecting closes the overlay and reports the new value; so does any
/// interaction outside the control ([`dismiss`](Picker::dismiss)), minus the
/// report.
#[derive(Debug, Clone)]
pub struct Picker<T> {
    options: Vec<PickerOption<T>>,
    value: T,
    placeholder: String,
    open: bool,
}

impl<T: Clone + PartialEq> Picker<T> {
    /// Create a closed picker showing `value`.
    pub fn new(options: Vec<PickerOption<T>>, value: T, placeholder: impl Into<String>) -> Self {
        Self {
            options,
            value,
            placeholder: placeholder.into(),
            open: false,
        }
    }

    /// Open or close the overlay.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Close the overlay without changing the value.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Whether the overlay is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Choose a value. Returns it when it is a known option different from
    /// the current one.
    pub fn select(&mut self, value: T) -> Option<T> {
        self.open = false;
        if value == self.value || !self.options.iter().any(|o| o.value == value) {
            return None;
        }
        self.value = value.clone();
        Some(value)
    }

    /// Choose the option at `index`.
    pub fn select_index(&mut self, index: usize) -> Option<T> {
        let value = self.options.get(index)?.value.clone();
        self.select(value)
    }

    /// Current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// All options, in display order.
    pub fn options(&self) -> &[PickerOption<T>] {
        &self.options
    }

    /// Index of the current value.
    pub fn selected_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.value == self.value)
    }

    /// Label of the current value, or the placeholder if it is not an option.
    pub fn display_label(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
            .unwrap_or(&self.placeholder)
    }

    /// Option labels, in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }
}

impl Picker<String> {
    /// Category filter: "All Categories" (empty slug) followed by `categories`.
    pub fn categories(categories: &[Category], selected: Option<&str>) -> Self {
        let options = std::iter::once(PickerOption::new(String::new(), ALL_CATEGORIES))
            .chain(
                categories
                    .iter()
                    .map(|c| PickerOption::new(c.slug.clone(), c.display_name.clone())),
            )
            .collect();
        Self::new(options, selected.unwrap_or_default().to_string(), ALL_CATEGORIES)
    }
}

impl Picker<SortOption> {
    /// Sort picker over every sort option.
    pub fn sort_options(selected: SortOption) -> Self {
        let options = SortOption::ALL
            .iter()
            .map(|s| PickerOption::new(*s, s.display_name()))
            .collect();
        Self::new(options, selected, "Sort")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Picker<String> {
        Picker::categories(
            &[
                Category::new("beauty", "Beauty"),
                Category::new("mens-shirts", "Mens Shirts"),
            ],
            None,
        )
    }

    #[test]
    fn test_category_picker_options() {
        let picker = categories();
        assert_eq!(picker.labels(), vec!["All Categories", "Beauty", "Mens Shirts"]);
        assert_eq!(picker.value(), "");
        assert_eq!(picker.display_label(), "All Categories");
        assert_eq!(picker.selected_index(), Some(0));
    }

    #[test]
    fn test_select_reports_change_and_closes() {
        let mut picker = categories();
        picker.toggle();
        assert!(picker.is_open());

        assert_eq!(picker.select("beauty".to_string()), Some("beauty".to_string()));
        assert!(!picker.is_open());
        assert_eq!(picker.display_label(), "Beauty");

        picker.toggle();
        assert_eq!(picker.select("beauty".to_string()), None);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_unknown_value_is_ignored() {
        let mut picker = categories();
        assert_eq!(picker.select("garden".to_string()), None);
        assert_eq!(picker.value(), "");
    }

    #[test]
    fn test_dismiss_keeps_value() {
        let mut picker = categories();
        picker.select_index(2);
        picker.toggle();
        picker.dismiss();
        assert!(!picker.is_open());
        assert_eq!(picker.value(), "mens-shirts");
    }

    #[test]
    fn test_placeholder_for_unknown_current_value() {
        let picker = Picker::categories(&[], Some("vanished"));
        assert_eq!(picker.display_label(), "All Categories");
        assert_eq!(picker.selected_index(), None);
    }

    #[test]
    fn test_sort_picker() {
        let mut picker = Picker::sort_options(SortOption::PriceAsc);
        assert_eq!(picker.display_label(), "Price: Low to High");
        assert_eq!(picker.options().len(), 4);
        assert_eq!(picker.select_index(0), Some(SortOption::Newest));
        assert_eq!(picker.select_index(9), None);
    }
}
