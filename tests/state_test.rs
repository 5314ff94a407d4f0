//! View state transitions through the public reducer

use chrono::NaiveTime;
use processpro::domain::{RoomId, CHAT_ROOMS};
use processpro::state::{Profile, Tab, Update, ViewState};

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn send(state: ViewState, text: &str, sent_at: NaiveTime) -> ViewState {
    state
        .reduce(Update::SetDraftText(text.to_string()))
        .reduce(Update::SendMessage { sent_at })
}

mod test_initial_state {
    use super::*;

    #[test]
    fn starts_on_dashboard_in_first_room() {
        let state = ViewState::default();
        assert_eq!(state.active_tab, Tab::Dashboard);
        assert_eq!(state.selected_room, RoomId(1));
        assert_eq!(state.draft, "");
        assert_eq!(state.log.len(), 5);
        assert_eq!(state.room_title(), "Project Alpha");
    }

    #[test]
    fn seed_ids_are_one_through_five() {
        let state = ViewState::default();
        let ids: Vec<u64> = state.log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn own_messages_use_profile_name() {
        let state = ViewState::new(Profile {
            user_name: "Morgan".to_string(),
            ..Profile::default()
        });
        for message in state.log.messages() {
            if message.is_from_current_user {
                assert_eq!(message.sender, "Morgan");
            }
        }
        assert!(state.log.messages()[3].text.starts_with("@Morgan "));
    }
}

mod test_navigation {
    use super::*;

    #[test]
    fn select_tab_touches_nothing_else() {
        let before = ViewState::default().reduce(Update::SetDraftText("hold".to_string()));
        let after = before.clone().reduce(Update::SelectTab(Tab::Chat));
        assert_eq!(after.active_tab, Tab::Chat);
        assert_eq!(after.draft, before.draft);
        assert_eq!(after.selected_room, before.selected_room);
        assert_eq!(after.log, before.log);
    }

    #[test]
    fn select_tab_is_idempotent() {
        let once = ViewState::default().reduce(Update::SelectTab(Tab::Chat));
        let twice = once.clone().reduce(Update::SelectTab(Tab::Chat));
        assert_eq!(once, twice);
    }

    #[test]
    fn every_room_selects_with_its_title() {
        for room in CHAT_ROOMS {
            let state = ViewState::default().reduce(Update::SelectRoom(room.id));
            assert_eq!(state.selected_room, room.id);
            assert_eq!(state.room_title(), room.name);
        }
    }

    #[test]
    fn unknown_room_is_accepted_with_blank_title() {
        let state = ViewState::default().reduce(Update::SelectRoom(RoomId(999)));
        assert_eq!(state.selected_room, RoomId(999));
        assert!(state.selected_room().is_none());
        assert_eq!(state.room_title(), "");
    }

    #[test]
    fn switching_rooms_keeps_one_shared_log() {
        let state = send(ViewState::default(), "alpha only?", at(10, 0));
        let state = state.reduce(Update::SelectRoom(RoomId(4)));
        assert_eq!(state.log.len(), 6);
        assert_eq!(state.log.last().unwrap().text, "alpha only?");
    }
}

mod test_send_message {
    use super::*;

    #[test]
    fn appends_draft_and_clears_it() {
        let state = ViewState::default().reduce(Update::SelectTab(Tab::Chat));
        let state = send(state, "Let's sync at 3pm", at(15, 4));

        assert_eq!(state.log.len(), 6);
        assert_eq!(state.draft, "");
        let last = state.log.last().unwrap();
        assert_eq!(last.id, 6);
        assert_eq!(last.sender, "Swaathi");
        assert_eq!(last.text, "Let's sync at 3pm");
        assert_eq!(last.timestamp, "03:04 PM");
        assert!(last.is_from_current_user);
        assert!(!last.mention);
    }

    #[test]
    fn blank_drafts_are_ignored() {
        for draft in ["", "   ", "\t\n"] {
            let before = ViewState::default().reduce(Update::SetDraftText(draft.to_string()));
            let after = before.clone().reduce(Update::SendMessage { sent_at: at(9, 0) });
            assert_eq!(after, before);
        }
    }

    #[test]
    fn text_is_kept_verbatim() {
        let state = send(ViewState::default(), "  padded  ", at(9, 0));
        assert_eq!(state.log.last().unwrap().text, "  padded  ");
    }

    #[test]
    fn ids_keep_increasing() {
        let mut state = ViewState::default();
        for n in 0..3 {
            state = send(state, &format!("note {n}"), at(11, n));
        }
        let ids: Vec<u64> = state.log.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn custom_time_format() {
        let state = ViewState::new(Profile {
            time_format: "%H:%M".to_string(),
            ..Profile::default()
        });
        let state = send(state, "late", at(21, 15));
        assert_eq!(state.log.last().unwrap().timestamp, "21:15");
    }
}

mod test_room_filter {
    use super::*;

    #[test]
    fn filter_is_case_insensitive() {
        let state = ViewState::default().reduce(Update::SetRoomFilter("TEAM".to_string()));
        let names: Vec<&str> = state.visible_rooms().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Design Team"]);
    }

    #[test]
    fn filter_does_not_change_selection() {
        let state = ViewState::default().reduce(Update::SetRoomFilter("raj".to_string()));
        assert_eq!(state.selected_room, RoomId(1));
        assert_eq!(state.visible_rooms().len(), 1);
    }
}
