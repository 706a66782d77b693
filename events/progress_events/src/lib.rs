use {bevy::prelude::*, shared_components::GameKind};

/// Fired when a mini-game session reaches its natural end (countdown expiry,
/// or the last quiz question answered). Abandoned sessions never fire this.
///
/// # Observers
/// - `progression`: credits score as bio-credits + XP, bumps the
///   games-completed counter and rolls the drop table.
#[derive(Event, Debug)]
pub struct GameCompleted {
    pub kind: GameKind,
    pub score: u32,
}

/// Request to claim today's streak reward.
/// Triggered via `commands.trigger()` by the presentation layer.
#[derive(Event)]
pub struct ClaimDailyReward;

/// Notification for the presentation layer after rewards land (toasts).
/// Carries the aggregate so the UI does not have to re-derive it.
#[derive(Event, Debug)]
pub struct RewardClaimed {
    pub description: String,
    pub bio_credits: u32,
    pub xp: u32,
}
