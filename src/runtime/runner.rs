use crate::core::notification::{Notification, NotificationSink};
use crate::runtime::effect::Effect;
use crate::runtime::event::AppEvent;
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::runtime::scheduler::Scheduler;
use crate::state::app_state::AppState;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(120);

pub struct Runtime {
    state: AppState,
    terminal: Terminal,
    scheduler: Scheduler,
    key_bindings: KeyBindings,
    renderer: Renderer,
    toast_timeout: Duration,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl Runtime {
    pub fn new(state: AppState, terminal: Terminal, toast_timeout: Duration) -> Self {
        Self {
            state,
            terminal,
            scheduler: Scheduler::new(),
            key_bindings: KeyBindings::new(),
            renderer: Renderer::default(),
            toast_timeout,
            sinks: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Extra receivers for submit notifications, besides the on-screen toast.
    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.state.should_exit() {
                self.process_scheduled_events()?;

                let timeout = self.scheduler.poll_timeout(Instant::now(), IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;
                self.dispatch_app_event(AppEvent::Terminal(event))?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn process_scheduled_events(&mut self) -> io::Result<()> {
        for event in self.scheduler.drain_ready(Instant::now()) {
            self.dispatch_app_event(event)?;
        }
        Ok(())
    }

    fn dispatch_app_event(&mut self, event: AppEvent) -> io::Result<()> {
        match event {
            AppEvent::Terminal(TerminalEvent::Resize(size)) => {
                self.terminal.set_size(size);
                self.render()
            }
            AppEvent::Terminal(TerminalEvent::Key(key)) => {
                let intent = self.key_bindings.resolve(key);
                self.process_intent(intent)
            }
            AppEvent::Terminal(TerminalEvent::Tick) => self.process_intent(Intent::Tick),
            AppEvent::Intent(intent) => self.process_intent(intent),
        }
    }

    fn process_intent(&mut self, intent: Intent) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.state, intent, self.toast_timeout);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Notify(notification) => {
                    self.deliver(&notification);
                    render_requested = true;
                }
                Effect::Schedule(cmd) => {
                    self.scheduler.schedule(cmd, Instant::now());
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested {
            self.render()?;
        }

        Ok(())
    }

    fn deliver(&mut self, notification: &Notification) {
        if let Err(err) = self.state.toasts_mut().notify(notification) {
            tracing::warn!(error = %err, "toast rejected notification");
        }
        for sink in &mut self.sinks {
            if let Err(err) = sink.notify(notification) {
                tracing::warn!(error = %err, "notification sink failed");
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.state, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}
