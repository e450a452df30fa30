use std::hash::Hash;

use egui::Ui;
use reno_core::calculations::parse_whole_number;

/// Text shown for a stored amount; zero shows as an empty field.
pub fn display_text(value: u64) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// A whole-number entry box. Returns the new value when the parsed entry
/// differs from `value`.
///
/// The raw text is kept while the field has focus so partial input such as
/// `"1,"` is not rewritten under the cursor.
pub fn whole_number_field(
    ui: &mut Ui,
    id_salt: impl Hash,
    value: u64,
    width: f32,
) -> Option<u64> {
    let id = ui.make_persistent_id(id_salt);
    let buffer_id = id.with("buffer");
    let mut text = ui
        .data_mut(|d| d.get_temp::<String>(buffer_id))
        .unwrap_or_else(|| display_text(value));

    let response = ui.add(
        egui::TextEdit::singleline(&mut text)
            .id(id)
            .desired_width(width)
            .hint_text("0"),
    );

    let changed = response
        .changed()
        .then(|| parse_whole_number(&text))
        .filter(|parsed| *parsed != value);

    if response.has_focus() {
        ui.data_mut(|d| d.insert_temp(buffer_id, text));
    } else {
        ui.data_mut(|d| d.remove::<String>(buffer_id));
    }
    changed
}
