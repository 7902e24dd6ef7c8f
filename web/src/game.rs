use crate::utils::*;
use bitflags::bitflags;
use clap::Args;
use game::{CellView, Notification, SessionState};
use gloo::timers::callback::Interval;
use sweeper_core as game;
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct CellPointerState {
    pos: game::Pos,
    buttons: MouseButtons,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Update(CellPointerState),
    Leave,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    NewGame,
    SelectDifficulty(game::Difficulty),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Face {
    Smile,
    Surprised,
    Cool,
    Dead,
}

impl Face {
    fn for_state(state: SessionState, mid_open: bool) -> Self {
        match state {
            SessionState::Won => Face::Cool,
            SessionState::Lost => Face::Dead,
            SessionState::Idle | SessionState::Active if mid_open => Face::Surprised,
            SessionState::Idle | SessionState::Active => Face::Smile,
        }
    }

    const fn glyph(self) -> &'static str {
        match self {
            Face::Smile => "🙂",
            Face::Surprised => "😮",
            Face::Cool => "😎",
            Face::Dead => "😵",
        }
    }
}

/// Title and body of the dialog shown once the game is over.
fn end_message(state: SessionState, elapsed: u16) -> Option<(&'static str, String)> {
    match state {
        SessionState::Won => Some(("YOU WON!", format!("Time: {} seconds", elapsed))),
        SessionState::Lost => Some(("GAME OVER", "You hit a mine!".to_string())),
        SessionState::Idle | SessionState::Active => None,
    }
}

fn cell_classes(view: CellView) -> Classes {
    use CellView::*;
    classes!(
        "cell",
        match view {
            Hidden => classes!(),
            Revealed(count) => classes!("revealed", format!("num-{}", count)),
            Flagged => classes!("flagged"),
            Mine => classes!("revealed", "mine"),
            TriggeredMine => classes!("revealed", "mine", "oops"),
            Misflagged => classes!("flagged", "wrong-flag"),
        }
    )
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    pos: game::Pos,
    view: CellView,
    #[prop_or_default]
    pressed: bool,
    callback: Callback<CellMsg>,
}

#[function_component(CellTile)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        pos,
        view,
        pressed,
        callback,
    } = props.clone();

    let mut class = cell_classes(view);
    if pressed {
        class.push("pressed");
    }

    let pointer_update = |event: &'static str| {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            callback.emit(CellMsg::Update(CellPointerState { pos, buttons }));
            log::trace!("{} mouse {} ({:?})", pos, event, buttons);
        })
    };
    let onmousedown = pointer_update("down");
    let onmouseup = pointer_update("up");
    let onmouseenter = pointer_update("enter");

    let onmouseleave = Callback::from(move |_: MouseEvent| {
        callback.emit(CellMsg::Leave);
        log::trace!("{} mouse leave", pos);
    });

    let label = match view {
        CellView::Revealed(count) if count > 0 => count.to_string(),
        _ => String::new(),
    };

    html! {
        <td {class} {onmousedown} {onmouseup} {onmouseenter} {onmouseleave}>{label}</td>
    }
}

#[derive(Args, Properties, Debug, Default, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Board to start on: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<game::Difficulty>,
}

pub(crate) struct GameView {
    session: game::Session,
    difficulty: game::Difficulty,
    current_cell_state: Option<CellPointerState>,
    dialog_open: bool,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn is_mid_open(&self) -> bool {
        matches!(
            self.current_cell_state,
            Some(CellPointerState {
                buttons: MouseButtons::LEFT,
                ..
            })
        )
    }

    fn is_pressed(&self, pos: game::Pos, view: CellView) -> bool {
        self.session.state().is_playable()
            && view == CellView::Hidden
            && matches!(
                self.current_cell_state,
                Some(CellPointerState {
                    pos: pressed,
                    buttons: MouseButtons::LEFT,
                }) if pressed == pos
            )
    }

    fn reveal_cell(&mut self, pos: game::Pos) -> bool {
        let result = self.session.reveal(pos);
        if let Err(err) = &result {
            log::warn!("reveal at {} rejected: {}", pos, err);
        }
        result.has_update()
    }

    fn mark_cell(&mut self, pos: game::Pos) -> bool {
        let result = self.session.toggle_flag(pos);
        if let Err(err) = &result {
            log::warn!("flag at {} rejected: {}", pos, err);
        }
        result.has_update()
    }

    fn start_game(&mut self, difficulty: game::Difficulty) {
        self.difficulty = difficulty;
        self.dialog_open = false;
        self.session.initialize(difficulty);
    }

    /// Renders off the engine's change events; restarts the clock on the first reveal so it ticks on whole seconds.
    fn apply_notifications(&mut self, ctx: &Context<Self>) -> bool {
        let mut changed = false;
        for notification in self.session.drain_notifications() {
            log::trace!("notification: {:?}", notification);
            changed = true;

            match notification {
                Notification::StateChanged {
                    state: SessionState::Active,
                    ..
                } => {
                    self._timer_interval = Self::create_timer(ctx);
                }
                Notification::StateChanged { state, elapsed } if state.is_finished() => {
                    log::debug!("game over: {:?} after {}s", state, elapsed);
                    self.dialog_open = true;
                }
                _ => {}
            }
        }
        changed
    }

    fn end_dialog(&self, ctx: &Context<Self>) -> Html {
        let Some((title, message)) =
            end_message(self.session.state(), self.session.elapsed_secs())
        else {
            return html! {};
        };
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::NewGame);

        html! {
            <dialog id="modal" open={self.dialog_open}>
                <article>
                    <h2>{title}</h2>
                    <p>{message}</p>
                    <footer>
                        <button onclick={cb_restart}>{"Play Again"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let difficulty = props
            .difficulty
            .unwrap_or_else(LocalOrDefault::local_or_default);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("starting {} with seed {}", difficulty, seed);

        let mut session = game::Session::new(difficulty, seed);
        session.drain_notifications().for_each(drop);

        Self {
            session,
            difficulty,
            current_cell_state: None,
            dialog_open: false,
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        let updated = match msg {
            CellEvent(Leave) => self.current_cell_state.take().is_some(),
            CellEvent(Update(cell_state)) => {
                if cell_state.buttons.is_empty() {
                    match self.current_cell_state.take() {
                        None => false,
                        Some(CellPointerState { pos, buttons }) => {
                            match buttons {
                                MouseButtons::LEFT => {
                                    log::debug!("reveal cell: {}", pos);
                                    self.reveal_cell(pos);
                                }
                                MouseButtons::RIGHT => {
                                    log::debug!("mark cell: {}", pos);
                                    self.mark_cell(pos);
                                }
                                _ => {}
                            }
                            true
                        }
                    }
                } else {
                    self.current_cell_state.replace(cell_state) != Some(cell_state)
                }
            }
            Tick => self.session.tick(),
            NewGame => {
                self.start_game(self.difficulty);
                true
            }
            SelectDifficulty(difficulty) => {
                difficulty.local_save();
                self.start_game(difficulty);
                true
            }
        };

        self.apply_notifications(ctx) || updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (rows, cols) = self.session.size();
        let state = self.session.state();
        let face = Face::for_state(state, self.is_mid_open());
        let mines_left = format_for_counter(self.session.flags_remaining());
        let elapsed_time = format_for_counter(i32::from(self.session.elapsed_secs()));

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });

        html! {
            <div class="sweeper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <menu>
                    {
                        for game::Difficulty::ALL.into_iter().map(|difficulty| {
                            let active = (difficulty == self.difficulty).then_some("active");
                            let onclick = ctx.link().callback(move |_: MouseEvent| SelectDifficulty(difficulty));
                            html! {
                                <li>
                                    <button class={classes!("diff-btn", active)} {onclick}>{difficulty.key()}</button>
                                </li>
                            }
                        })
                    }
                </menu>
                <nav>
                    <aside id="mine-count">{mines_left}</aside>
                    <span><button class="face" onclick={cb_new_game}>{face.glyph()}</button></span>
                    <aside id="timer">{elapsed_time}</aside>
                </nav>
                <table class={classes!("board", state.is_playable().then_some("playable"))}>
                    {
                        for (0..rows).map(|row| html! {
                            <tr>
                                {
                                    for (0..cols).map(|col| {
                                        let pos = game::Pos::new(row, col);
                                        let view = self.session.cell_view(pos);
                                        let pressed = self.is_pressed(pos, view);
                                        let callback = ctx.link().callback(Msg::CellEvent);
                                        html! {
                                            <CellTile {pos} {view} {pressed} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                { self.end_dialog(ctx) }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{FixedLayout, GameConfig, Pos, Session};

    #[test]
    fn end_dialog_text_follows_outcome() {
        assert_eq!(
            end_message(SessionState::Won, 42),
            Some(("YOU WON!", "Time: 42 seconds".to_string()))
        );
        assert_eq!(
            end_message(SessionState::Lost, 3),
            Some(("GAME OVER", "You hit a mine!".to_string()))
        );
        assert_eq!(end_message(SessionState::Active, 3), None);
        assert_eq!(end_message(SessionState::Idle, 0), None);
    }

    #[test]
    fn face_tracks_session_and_pointer() {
        assert_eq!(Face::for_state(SessionState::Idle, false), Face::Smile);
        assert_eq!(Face::for_state(SessionState::Active, true), Face::Surprised);
        assert_eq!(Face::for_state(SessionState::Won, true), Face::Cool);
        assert_eq!(Face::for_state(SessionState::Lost, false).glyph(), "😵");
    }

    #[test]
    fn lost_board_maps_to_disclosure_classes() {
        let config = GameConfig::new(2, 2, 2).unwrap();
        let mut session =
            Session::with_generator(config, FixedLayout::new([Pos::new(0, 0), Pos::new(0, 1)]));

        session.reveal(Pos::new(1, 1)).unwrap();
        session.toggle_flag(Pos::new(1, 0)).unwrap();
        session.reveal(Pos::new(0, 0)).unwrap();

        let triggered = cell_classes(session.cell_view(Pos::new(0, 0)));
        assert!(triggered.contains("oops"));
        assert!(cell_classes(session.cell_view(Pos::new(0, 1))).contains("mine"));
        assert!(cell_classes(session.cell_view(Pos::new(1, 0))).contains("wrong-flag"));
        assert!(cell_classes(session.cell_view(Pos::new(1, 1))).contains("num-2"));
    }
}
