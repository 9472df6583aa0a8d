use holdem_shared::ActionEvent;

pub(crate) const MAX_RECENT_ACTIONS: usize = 50;

pub(crate) fn cap_logs(recent_actions: &mut Vec<ActionEvent>) {
    if recent_actions.len() > MAX_RECENT_ACTIONS {
        let to_remove = recent_actions.len() - MAX_RECENT_ACTIONS;
        recent_actions.drain(0..to_remove);
    }
}
