//! Components for mini-game sessions and their playing-field entities.

use {bevy::prelude::*, shared_components::GameKind};

pub struct MinigameComponentsPlugin;

impl Plugin for MinigameComponentsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameSession>()
            .register_type::<HazardSpawner>()
            .register_type::<ComboTracker>()
            .register_type::<HazardNode>()
            .register_type::<FragmentNode>()
            .register_type::<PatrolNode>()
            .register_type::<SelectedFragment>()
            .register_type::<QuizBoard>()
            .register_type::<SortBoard>()
            .register_type::<FieldPosition>();
    }
}

/// Root entity of a running mini-game session.
///
/// Field entities (hazards, fragments, patrol targets) are spawned as
/// children via `ChildOf`, so despawning the session tears down the whole
/// playing field in one call. Score accrues here until the countdown
/// reaches zero; abandoning the session discards it.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct GameSession {
    pub kind: GameKind,
    pub score: u32,
    /// One-shot countdown for the session's duration.
    pub countdown: Timer,
}

impl GameSession {
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            score: 0,
            countdown: Timer::from_seconds(session_duration_secs(kind), TimerMode::Once),
        }
    }
}

/// Session duration per game kind, in seconds.
pub fn session_duration_secs(kind: GameKind) -> f32 {
    match kind {
        GameKind::Decontaminate => 45.0,
        GameKind::DataStream => 60.0,
        GameKind::BioForge => 60.0,
        GameKind::RecycleSort => 30.0,
        GameKind::WildlifePatrol => 120.0,
    }
}

/// Periodic spawner for sessions that trickle extra hazards onto the field.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct HazardSpawner(pub Timer);

impl Default for HazardSpawner {
    fn default() -> Self {
        Self(Timer::from_seconds(2.5, TimerMode::Repeating))
    }
}

/// Tracks rapid sequential hits. The multiplier grows with each hit and
/// resets after 3 seconds without one.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct ComboTracker {
    pub count: u32,
    pub idle: Timer,
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self {
            count: 0,
            idle: Timer::from_seconds(3.0, TimerMode::Once),
        }
    }
}

impl ComboTracker {
    /// Multiplier applied to the next hit, capped at 5x.
    pub fn multiplier(&self) -> u32 {
        (self.count + 1).min(5)
    }

    pub fn register_hit(&mut self) {
        self.count += 1;
        self.idle.reset();
    }
}

/// Normalized position inside the bounded playing field (percentages).
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct FieldPosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    Viral,
    Toxic,
    Radiation,
    Corruption,
}

impl HazardKind {
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Viral,
        HazardKind::Toxic,
        HazardKind::Radiation,
        HazardKind::Corruption,
    ];
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeSize {
    Small,
    Medium,
    Large,
}

impl NodeSize {
    pub const ALL: [NodeSize; 3] = [NodeSize::Small, NodeSize::Medium, NodeSize::Large];

    /// Base score awarded for cleansing a hazard of this size.
    pub fn base_score(self) -> u32 {
        match self {
            NodeSize::Small => 10,
            NodeSize::Medium => 15,
            NodeSize::Large => 20,
        }
    }
}

/// A contamination node on the decontamination field.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct HazardNode {
    pub kind: HazardKind,
    pub size: NodeSize,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Bio,
    Synth,
    Energy,
    Data,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 4] = [
        FragmentKind::Bio,
        FragmentKind::Synth,
        FragmentKind::Energy,
        FragmentKind::Data,
    ];
}

/// A genetic fragment on the synthesis field. Two fragments of different
/// kinds can be merged for score; same-kind pairs are incompatible.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct FragmentNode {
    pub kind: FragmentKind,
}

/// Marker for the fragment currently selected as the first half of a pair.
#[derive(Component, Reflect, Default, Debug, Clone, Copy)]
#[reflect(Component)]
pub struct SelectedFragment;

/// A patrol target: either a threat to neutralize or protected wildlife
/// that must not be hit.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub enum PatrolNode {
    Threat { points: u32 },
    Wildlife,
}

/// Quiz state attached to a data-stream session. Answers index into the
/// current question's options; the board advances regardless of
/// correctness and finishes after the final question.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct QuizBoard {
    pub questions: Vec<QuizQuestion>,
    pub current: usize,
}

impl QuizBoard {
    pub fn finished(&self) -> bool {
        self.current >= self.questions.len()
    }
}

#[derive(Reflect, Debug, Clone, Default)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
}

/// The waste categories a recycling bin accepts.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WasteKind {
    #[default]
    Paper,
    Plastic,
    Glass,
    Organic,
}

impl WasteKind {
    pub const ALL: [WasteKind; 4] = [
        WasteKind::Paper,
        WasteKind::Plastic,
        WasteKind::Glass,
        WasteKind::Organic,
    ];
}

/// Sorting state attached to a recycle-sort session. One waste item is up
/// at a time; the board advances regardless of the bin picked and finishes
/// after the last item.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct SortBoard {
    pub items: Vec<WasteKind>,
    pub current: usize,
}

impl SortBoard {
    pub fn finished(&self) -> bool {
        self.current >= self.items.len()
    }
}
