//! Button menus attached to conversation responses

use crate::core::{Choice, ChoiceMenu, ChoiceStyle};
use crate::features::wordlists::WordlistId;

use super::event::ButtonAction;

const WORDLISTS_PER_ROW: usize = 2;

fn choice(label: &str, action: ButtonAction, style: ChoiceStyle) -> Choice {
    Choice::new(label, action.payload(), style)
}

/// Single Generate button
pub fn generate_menu() -> ChoiceMenu {
    ChoiceMenu::new(vec![vec![choice(
        "🎲 Generate",
        ButtonAction::Generate,
        ChoiceStyle::Primary,
    )]])
}

/// Cancel button under a pending-action prompt
pub fn cancel_action_menu() -> ChoiceMenu {
    ChoiceMenu::new(vec![vec![choice(
        "Cancel",
        ButtonAction::CancelAction,
        ChoiceStyle::Secondary,
    )]])
}

/// Buttons under a generated passphrase
pub fn passphrase_menu() -> ChoiceMenu {
    ChoiceMenu::new(vec![vec![
        choice("🗑️ Delete", ButtonAction::Delete, ChoiceStyle::Danger),
        choice("🔀 Regenerate", ButtonAction::Regenerate, ChoiceStyle::Primary),
    ]])
}

/// Wordlist chooser: two lists per row, Cancel joins a half-filled last row
/// or gets a row of its own
pub fn wordlist_menu(wordlists: impl IntoIterator<Item = WordlistId>) -> ChoiceMenu {
    let buttons: Vec<Choice> = wordlists
        .into_iter()
        .map(|id| {
            choice(
                id.name(),
                ButtonAction::SelectWordlist(id.index() as i64),
                ChoiceStyle::Secondary,
            )
        })
        .collect();

    let mut rows: Vec<Vec<Choice>> = buttons
        .chunks(WORDLISTS_PER_ROW)
        .map(|row| row.to_vec())
        .collect();

    let cancel = choice("Cancel", ButtonAction::Cancel, ChoiceStyle::Danger);
    match rows.last_mut() {
        Some(last) if last.len() == 1 => last.push(cancel),
        _ => rows.push(vec![cancel]),
    }

    ChoiceMenu::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(menu: &ChoiceMenu) -> Vec<Vec<&str>> {
        menu.rows
            .iter()
            .map(|row| row.iter().map(|c| c.label.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_full_catalog_layout() {
        let menu = wordlist_menu(WordlistId::ALL);
        assert_eq!(
            labels(&menu),
            vec![
                vec!["BIP39", "Wordle"],
                vec!["Dice Long", "Dice Short 1"],
                vec!["Dice Short 2", "Cancel"],
            ]
        );
        assert_eq!(
            menu.payloads().collect::<Vec<_>>(),
            vec!["setwl$$0", "setwl$$1", "setwl$$2", "setwl$$3", "setwl$$4", "system$$cancel"]
        );
    }

    #[test]
    fn test_even_count_gets_cancel_row() {
        let menu = wordlist_menu([WordlistId::Bip39, WordlistId::Wordle]);
        assert_eq!(labels(&menu), vec![vec!["BIP39", "Wordle"], vec!["Cancel"]]);
    }

    #[test]
    fn test_no_wordlists_still_cancellable() {
        let menu = wordlist_menu(Vec::new());
        assert_eq!(labels(&menu), vec![vec!["Cancel"]]);
    }

    #[test]
    fn test_passphrase_menu_payloads() {
        assert_eq!(
            passphrase_menu().payloads().collect::<Vec<_>>(),
            vec!["delete", "regenerate"]
        );
        assert_eq!(
            cancel_action_menu().payloads().collect::<Vec<_>>(),
            vec!["system$$cancelaction"]
        );
        assert_eq!(generate_menu().payloads().collect::<Vec<_>>(), vec!["generate"]);
    }
}
