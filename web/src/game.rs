use crate::theme::Theme;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use memorush_core as game;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

/// Player preferences kept between visits. Scores are never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Preferences {
    pub difficulty: game::Difficulty,
}

impl StorageKey for Preferences {
    const KEY: &'static str = "memorush:preferences";
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(game::CardId),
    Tick(game::RoundId),
    Complete(game::Completion),
    SetDifficulty(game::Difficulty),
    Reset,
    CycleTheme,
}

fn status_class(status: game::EngineStatus) -> &'static str {
    use game::EngineStatus::*;
    match status {
        Idle => "not-started",
        Active => "in-progress",
        Won => "win",
    }
}

fn pairs_label(snapshot: &game::Snapshot) -> String {
    format!("{}/{} pairs", snapshot.matched_pairs, snapshot.total_pairs)
}

fn moves_label(moves: game::MoveCount) -> String {
    match moves {
        1 => "1 move".to_string(),
        moves => format!("{} moves", moves),
    }
}

fn asset_path(symbol: game::Symbol) -> String {
    format!("img/{}.jpg", symbol.name())
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: game::CardView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardTile)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        card.revealed.then_some("face-up"),
        card.matched.then_some("matched")
    );
    let disabled = card.matched || locked;
    let aria_label = card.label();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.id);
        callback.emit(card.id);
    });

    html! {
        <button {class} {onclick} {disabled} aria-label={aria_label}>
            if let Some(symbol) = card.face.symbol() {
                <img src={asset_path(symbol)} alt={symbol.name()} draggable="false"/>
            }
        </button>
    }
}

fn efficiency_label(pairs: game::PairCount, moves: game::MoveCount) -> Option<String> {
    game::efficiency(pairs, moves).map(|ratio| format!("{:.0}% efficiency", ratio * 100.0))
}

#[derive(Properties, Clone, PartialEq)]
struct VictoryProps {
    elapsed_secs: game::Seconds,
    moves: game::MoveCount,
    pairs: game::PairCount,
    rating: game::StarRating,
}

#[function_component(Victory)]
fn victory_component(props: &VictoryProps) -> Html {
    let stars = props.rating.stars();
    html! {
        <section class="victory">
            <h3>{"Congratulations!"}</h3>
            <p>
                {format!(
                    "You completed the game in {} with {}!",
                    format_time(props.elapsed_secs),
                    moves_label(props.moves)
                )}
            </p>
            if let Some(label) = efficiency_label(props.pairs, props.moves) {
                <p class="efficiency">{label}</p>
            }
            <div class="stars">
                {
                    for (0..game::StarRating::MAX_STARS).map(|i| html! {
                        <span class={classes!("star", (i < stars).then_some("lit"))}>{"⭐"}</span>
                    })
                }
            </div>
        </section>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Difficulty to start with (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<game::Difficulty>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::MatchEngine,
    preferences: Preferences,
    theme: Theme,
    forced_seed: Option<u64>,
    ticker: Option<Interval>,
    pending: Option<Timeout>,
}

impl GameView {
    /// Seed for the next deal, a forced seed makes the whole session replayable.
    fn next_seed(&self) -> u64 {
        match self.forced_seed {
            Some(_) => game::next_seed(self.engine.seed()),
            None => js_random_seed(),
        }
    }

    fn schedule(&mut self, ctx: &Context<Self>, completion: game::Completion) {
        let link = ctx.link().clone();
        let delay = completion.delay_ms() as u32;
        log::debug!("scheduling {:?} in {}ms", completion.kind, delay);
        self.pending = Some(Timeout::new(delay, move || {
            link.send_message(Msg::Complete(completion))
        }));
    }

    /// Runs the one-second interval exactly while the round is active.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        if !self.engine.status().is_active() {
            self.ticker = None;
            return;
        }
        if self.ticker.is_none() {
            let link = ctx.link().clone();
            let round = self.engine.round();
            self.ticker = Some(Interval::new(game::TICK_INTERVAL_MS as u32, move || {
                link.send_message(Msg::Tick(round))
            }));
        }
    }

    /// Drops timers of the previous round, their messages would be stale anyway.
    fn on_deal(&mut self) {
        self.pending = None;
        self.ticker = None;
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut preferences: Preferences = LocalOrDefault::local_or_default();
        if let Some(difficulty) = props.difficulty {
            preferences.difficulty = difficulty;
        }
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("difficulty: {}, seed: {}", preferences.difficulty, seed);

        Self {
            engine: game::MatchEngine::new(preferences.difficulty, seed),
            preferences,
            theme: Theme::init(),
            forced_seed: props.seed,
            ticker: None,
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Select(id) => {
                let status = self.engine.status();
                let outcome = self.engine.select(id);
                if let Some(completion) = outcome.completion() {
                    self.schedule(ctx, completion);
                }
                self.sync_timer(ctx);
                outcome.has_update() || status != self.engine.status()
            }
            Tick(round) => self.engine.tick(round),
            Complete(completion) => {
                let outcome = self.engine.complete(completion);
                match outcome {
                    game::CompleteOutcome::Won(redeal) => self.schedule(ctx, redeal),
                    game::CompleteOutcome::Redealt => self.on_deal(),
                    _ => {}
                }
                self.sync_timer(ctx);
                outcome.has_update()
            }
            SetDifficulty(difficulty) => {
                log::debug!("difficulty changed to {}", difficulty);
                self.preferences.difficulty = difficulty;
                self.preferences.local_save();
                let seed = self.next_seed();
                self.engine.set_difficulty(difficulty, seed);
                self.on_deal();
                true
            }
            Reset => {
                log::debug!("reset requested");
                let seed = self.next_seed();
                self.engine.reset(seed);
                self.on_deal();
                true
            }
            CycleTheme => {
                self.theme = self.theme.next();
                self.theme.apply();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.engine.snapshot();
        let locked = self.engine.is_locked();
        let current = self.preferences.difficulty;
        let board_class = classes!("board", status_class(snapshot.status));

        let cb_reset = ctx.link().callback(|_: MouseEvent| Reset);
        let cb_theme = ctx.link().callback(|_: MouseEvent| CycleTheme);
        let cb_select = ctx.link().callback(Select);

        html! {
            <div class="memorush">
                <header>
                    <h1>{"Memory Match"}</h1>
                    <small onclick={cb_theme}>{self.theme.label()}</small>
                </header>
                <nav>
                    <aside class="time">{format_time(snapshot.elapsed_secs)}</aside>
                    <aside class="moves">{moves_label(snapshot.moves)}</aside>
                    <aside class="pairs">{pairs_label(&snapshot)}</aside>
                    <menu>
                        {
                            for game::Difficulty::ALL.into_iter().map(|difficulty| {
                                let onclick = ctx.link().callback(move |_: MouseEvent| SetDifficulty(difficulty));
                                let class = classes!((difficulty == current).then_some("selected"));
                                html! {
                                    <li><button {class} {onclick}>{difficulty.name()}</button></li>
                                }
                            })
                        }
                        <li><button class="reset" onclick={cb_reset}>{"Reset"}</button></li>
                    </menu>
                </nav>
                if let Some(rating) = snapshot.rating {
                    <Victory
                        elapsed_secs={snapshot.elapsed_secs}
                        moves={snapshot.moves}
                        pairs={snapshot.total_pairs}
                        {rating}
                    />
                }
                <div class={board_class}>
                    {
                        for snapshot.rows().map(|row| html! {
                            <div class="row">
                                {
                                    for row.iter().map(|&card| html! {
                                        <CardTile key={card.id} {card} {locked} callback={cb_select.clone()}/>
                                    })
                                }
                            </div>
                        })
                    }
                </div>
            </div>
        }
    }
}
