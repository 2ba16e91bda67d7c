//! Property-based tests for scripted input against the settings menu.
//!
//! For any symbol sequence:
//!
//! 1. Running the script never fails; inapplicable inputs are ignored.
//! 2. Each radio submenu keeps exactly one checked choice.
//! 3. The LCD frame is always `rows` lines of `cols` cells.

use knobmenu_demo::app::{DemoApp, ids};
use knobmenu_demo::cli::Opts;
use knobmenu_render::display_width;
use proptest::prelude::*;

fn script_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['>', '<', 'r', 'l', 'c', 'C', 'L', 'x']), 0..60)
        .prop_map(|symbols| symbols.into_iter().collect())
}

fn checked_count(app: &DemoApp, choices: &[i32]) -> usize {
    choices.iter()
        .filter(|&&id| {
            let node = app.menu().find(id, true).unwrap();
            app.menu().tree()[node].is_checked()
        })
        .count()
}

proptest! {
    #[test]
    fn random_scripts_keep_menu_consistent(
        script in script_strategy(),
        rows in 1usize..5,
        cols in 1usize..24,
        ascii in any::<bool>(),
    ) {
        let opts = Opts { rows, cols, ascii, ..Opts::default() };
        let mut app = DemoApp::new(&opts).unwrap();
        prop_assert!(app.run_script(&script).is_ok());

        prop_assert_eq!(checked_count(&app, &[ids::CURVE_LINEAR, ids::CURVE_QUADRATIC]), 1);
        prop_assert_eq!(checked_count(&app, &[ids::FREQ_UNITS_RPM, ids::FREQ_UNITS_HZ]), 1);

        let (pass, lines) = app.frame();
        prop_assert_eq!(lines.len(), rows);
        for line in &lines {
            prop_assert_eq!(display_width(line), cols, "{:?}", line);
        }
        prop_assert!(pass.active_index < pass.level_len);
    }
}
