//! The `SimulationEngine` and its tick loop.

use std::sync::{Arc, PoisonError, RwLock};

use cs_config::CityConfig;
use cs_core::{SimConfig, Tick};
use cs_population::{
    EmploymentRule, PopulationModel, PopulationResult, Resident, StateChange, ThresholdRule,
};
use cs_stats::StatisticsCollector;
use cs_transport::{CongestionKind, CongestionModel, TickCosts, TransportModel};
use cs_zone::ZoneMap;

use crate::{
    ClockHandle, ClockResult, ClockState, EngineBuilder, EngineError, EngineResult, NoopObserver,
    SimObserver, SimulationClock, SimulationState, Snapshot, TickBudget,
};

type Published = Arc<RwLock<Arc<Snapshot>>>;

// ── RunReport ─────────────────────────────────────────────────────────────────

/// What one call to a run method did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub ticks_run:   u64,
    /// Last committed tick.
    pub final_tick:  Tick,
    /// Employment transitions over the whole run.
    pub transitions: usize,
    /// `true` when the run ended because the clock was stopped.
    pub stopped:     bool,
}

// ── SimulationEngine ──────────────────────────────────────────────────────────

/// Owns the live city state and advances it one tick at a time.
///
/// Every tick runs four phases in order:
///
/// 1. **Transport**: link loads from the commuters' current routes, then
///    congested costs and shortest routes for this tick.
/// 2. **Population**: employment decisions (parallel with the `parallel`
///    feature) applied in ascending `ResidentId` order.
/// 3. **Statistics**: one sample per metric.
/// 4. **Publish**: a new [`Snapshot`] replaces the previous one.
///
/// Phases 1 and 2 work on a staged copy of the state.  If any phase fails
/// the copy is dropped, the clock stops and the previous snapshot stays
/// published.
///
/// Create via [`SimulationEngine::configure`] or [`EngineBuilder`].
pub struct SimulationEngine<R: EmploymentRule, C: CongestionModel> {
    config:     SimConfig,
    clock:      SimulationClock,
    state:      SimulationState,
    transport:  TransportModel<C>,
    population: PopulationModel<R>,
    stats:      StatisticsCollector,
    latest:     Published,

    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl SimulationEngine<ThresholdRule, CongestionKind> {
    /// Validate `config` and build an engine for it.
    pub fn configure(config: &CityConfig) -> EngineResult<Self> {
        let city = config.build()?;
        EngineBuilder::new(city.zones, city.residents, city.rule)
            .congestion(city.congestion)
            .hire_limit(city.max_hires_per_zone_per_tick)
            .quit_limit(city.max_quits_per_tick)
            .config(city.sim)
            .build()
    }
}

impl<R: EmploymentRule, C: CongestionModel> SimulationEngine<R, C> {
    pub(crate) fn assemble(
        config:     SimConfig,
        zones:      ZoneMap,
        residents:  Vec<Resident>,
        costs:      TickCosts,
        transport:  TransportModel<C>,
        population: PopulationModel<R>,
    ) -> EngineResult<Self> {
        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads.unwrap_or(0))
            .build()
            .map_err(|e| cs_core::ConfigError::new("sim.num_threads", e.to_string()))?;

        let state = SimulationState { tick: Tick::ZERO, zones, residents, costs };
        let stats = StatisticsCollector::new();
        let initial = Snapshot::new(state.clone(), stats.all_series(), None);

        log::info!(
            "engine ready: {} zones, {} links, {} residents",
            state.zones.zone_count(),
            state.zones.link_count(),
            state.residents.len()
        );
        Ok(Self {
            config,
            clock: SimulationClock::new(),
            state,
            transport,
            population,
            stats,
            latest: Arc::new(RwLock::new(Arc::new(initial))),
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The committed state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn stats(&self) -> &StatisticsCollector {
        &self.stats
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    /// Last committed tick.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// The most recently published snapshot.
    pub fn latest_snapshot(&self) -> Arc<Snapshot> {
        read_latest(&self.latest)
    }

    /// Control and viewing surface for other threads.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle { clock: self.clock.handle(), latest: Arc::clone(&self.latest) }
    }

    pub fn pause(&self) -> ClockResult<()> {
        self.clock.pause()
    }

    pub fn resume(&self) -> ClockResult<()> {
        self.clock.resume()
    }

    pub fn stop(&self) {
        self.clock.stop();
    }

    /// Stop the clock and return the final snapshot.
    pub fn shutdown(self) -> Arc<Snapshot> {
        self.clock.stop();
        let last = self.latest_snapshot();
        log::info!("engine shut down at {}", last.tick());
        last
    }

    /// Run `ticks` ticks.
    pub fn run(&mut self, ticks: u64) -> EngineResult<RunReport> {
        self.run_with(TickBudget::Bounded(ticks), &mut NoopObserver)
    }

    /// Run until stopped through a handle.
    pub fn run_unbounded(&mut self) -> EngineResult<RunReport> {
        self.run_with(TickBudget::Unbounded, &mut NoopObserver)
    }

    /// Run up to `config.end_tick()`.
    pub fn run_to_end<O: SimObserver>(&mut self, observer: &mut O) -> EngineResult<RunReport> {
        let left = self.config.end_tick().since(self.current_tick());
        self.run_with(TickBudget::Bounded(left), observer)
    }

    /// Run for `budget` ticks, calling `observer` at every tick boundary.
    ///
    /// Returns [`EngineError::Paused`] or [`EngineError::Stopped`] without
    /// running anything when the clock is in that state.  A pause requested
    /// while running blocks the loop at the next boundary until resumed or
    /// stopped.
    pub fn run_with<O: SimObserver>(
        &mut self,
        budget:   TickBudget,
        observer: &mut O,
    ) -> EngineResult<RunReport> {
        match self.clock.state() {
            ClockState::Stopped => return Err(EngineError::Stopped),
            ClockState::Paused  => return Err(EngineError::Paused),
            ClockState::Idle | ClockState::Running => {}
        }
        self.clock.start(budget)?;

        let start = self.clock.current_tick();
        let mut transitions = 0;
        while let Some(tick) = self.clock.next_tick() {
            observer.on_tick_start(tick);
            let (changed, snapshot) = self.process_tick(tick)?;
            self.clock.complete_tick(tick);
            transitions += changed;

            observer.on_tick_end(tick, changed);
            if tick.0 % self.config.output_interval_ticks.max(1) == 0 {
                observer.on_snapshot(&snapshot);
            }
        }

        let final_tick = self.clock.current_tick();
        observer.on_sim_end(final_tick);
        Ok(RunReport {
            ticks_run: final_tick.since(start),
            final_tick,
            transitions,
            stopped: self.clock.state() == ClockState::Stopped,
        })
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, tick: Tick) -> EngineResult<(usize, Arc<Snapshot>)> {
        let mut staged = self.state.clone();

        // ── Phase 1: transport ────────────────────────────────────────────
        let loads = PopulationModel::<R>::link_loads(&staged.residents, staged.zones.link_count());
        staged.costs = self.transport.recompute(tick, &staged.zones, &loads);

        // ── Phase 2: population ───────────────────────────────────────────
        let changes = self
            .update_population(tick, &mut staged)
            .map_err(|e| self.fault(tick, e.to_string()))?;

        // ── Phase 3: statistics ───────────────────────────────────────────
        self.stats
            .aggregate(tick, &staged.zones, &staged.residents, &staged.costs, &changes)
            .map_err(|e| self.fault(tick, e.to_string()))?;

        // ── Phase 4: commit and publish ───────────────────────────────────
        staged.tick = tick;
        self.state  = staged;
        let snapshot = Arc::new(Snapshot::new(
            self.state.clone(),
            self.stats.all_series(),
            self.stats.report(),
        ));
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        log::debug!("{tick}: committed, {} transitions", changes.len());
        Ok((changes.len(), snapshot))
    }

    fn update_population(
        &self,
        tick:   Tick,
        staged: &mut SimulationState,
    ) -> PopulationResult<Vec<StateChange>> {
        let SimulationState { zones, residents, costs, .. } = staged;

        #[cfg(feature = "parallel")]
        {
            self.pool.install(|| self.population.update_all(tick, zones, residents, costs))
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.population.update_all(tick, zones, residents, costs)
        }
    }

    fn fault(&self, tick: Tick, reason: String) -> EngineError {
        self.clock.stop();
        log::warn!("{tick}: {reason}; tick discarded, engine stopped");
        EngineError::Fault { tick, reason }
    }
}

// ── EngineHandle ──────────────────────────────────────────────────────────────

/// Cloneable viewer surface: clock control plus the latest snapshot.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    clock:  ClockHandle,
    latest: Published,
}

impl EngineHandle {
    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    pub fn latest_snapshot(&self) -> Arc<Snapshot> {
        read_latest(&self.latest)
    }

    pub fn pause(&self) -> ClockResult<()> {
        self.clock.pause()
    }

    pub fn resume(&self) -> ClockResult<()> {
        self.clock.resume()
    }

    pub fn stop(&self) {
        self.clock.stop();
    }
}

fn read_latest(latest: &Published) -> Arc<Snapshot> {
    Arc::clone(&latest.read().unwrap_or_else(PoisonError::into_inner))
}
