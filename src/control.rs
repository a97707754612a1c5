use std::time::Duration;

use crate::{
    actuator::{ActuatorState, DebounceMemory, should_dispatch},
    classifier::{AirQualityCategory, classify},
    config::MemoryUpdate,
    dispatcher::{Acknowledgement, Dispatcher},
    error::{AcquisitionError, DispatchError},
    measurement::SensorReading,
    sensor::{Sensors, acquire},
};

const SEPARATOR: &str = "----------------------------------------";

#[derive(Debug)]
pub enum Dispatch {
    Suppressed,
    Sent(Acknowledgement),
    Failed(DispatchError),
}

#[derive(Debug)]
pub enum Cycle {
    Completed {
        reading: SensorReading,
        category: AirQualityCategory,
        state: ActuatorState,
        dispatch: Dispatch,
    },
    AcquisitionFailed(AcquisitionError),
}

/// Runs one acquire/classify/dispatch cycle and returns the memory for the next one.
pub fn step<S, D>(
    sensors: &mut S,
    dispatcher: &mut D,
    memory: DebounceMemory,
    policy: MemoryUpdate,
) -> (DebounceMemory, Cycle)
where
    S: Sensors,
    D: Dispatcher,
{
    let reading = match acquire(sensors) {
        Ok(reading) => reading,
        Err(e) => return (memory, Cycle::AcquisitionFailed(e)),
    };

    let classification = classify(reading.pm25);
    let category = classification.category;
    let state = ActuatorState::from(classification);

    let (memory, dispatch) = if should_dispatch(&state, category, &memory) {
        match dispatcher.dispatch(&state) {
            Ok(ack) => (memory.record(&state, category), Dispatch::Sent(ack)),
            Err(e) => {
                let memory = match policy {
                    MemoryUpdate::Always => memory.record(&state, category),
                    MemoryUpdate::OnSuccess => memory,
                };
                (memory, Dispatch::Failed(e))
            }
        }
    } else {
        (memory, Dispatch::Suppressed)
    };

    (
        memory,
        Cycle::Completed {
            reading,
            category,
            state,
            dispatch,
        },
    )
}

/// Writes the status lines for a finished cycle.
pub fn report(cycle: &Cycle) {
    let (reading, category, state, dispatch) = match cycle {
        Cycle::Completed {
            reading,
            category,
            state,
            dispatch,
        } => (reading, category, state, dispatch),
        Cycle::AcquisitionFailed(e) => {
            log::error!("Sensor read error: {e}");
            return;
        }
    };

    log::info!("{reading}");
    if *category == AirQualityCategory::Good {
        log::info!("Brightness: {} | Hue: {}", state.brightness, state.hue);
    }

    match dispatch {
        Dispatch::Sent(ack) => log::info!("Hue update: {ack}"),
        Dispatch::Failed(e) => log::error!("Hue update failed: {e}"),
        Dispatch::Suppressed => {}
    }

    log::info!("{SEPARATOR}");
}

pub struct ControlLoop<S, D> {
    sensors: S,
    dispatcher: D,
    memory: DebounceMemory,
    policy: MemoryUpdate,
}

impl<S, D> ControlLoop<S, D>
where
    S: Sensors,
    D: Dispatcher,
{
    pub fn new(sensors: S, dispatcher: D, policy: MemoryUpdate) -> Self {
        ControlLoop {
            sensors,
            dispatcher,
            memory: DebounceMemory::default(),
            policy,
        }
    }

    pub fn tick(&mut self) -> Cycle {
        let (memory, cycle) = step(
            &mut self.sensors,
            &mut self.dispatcher,
            self.memory,
            self.policy,
        );
        self.memory = memory;
        report(&cycle);
        cycle
    }

    /// Ticks forever, sleeping `period` after each cycle however long it took.
    pub async fn run(mut self, period: Duration) {
        loop {
            self.tick();
            tokio::time::sleep(period).await;
        }
    }
}
