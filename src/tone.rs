//! Piezo buzzer.

/// Square-wave generator driving the buzzer.
pub trait ToneDriver {
    /// Sets the wave period in timer cycles, duty at half of it. A period of
    /// zero silences the buzzer.
    fn set_period(&mut self, cycles: u16);
}

/// Compare value for a 50% duty cycle.
pub const fn half_duty(cycles: u16) -> u16 {
    cycles >> 1
}

pub struct Buzzer<T> {
    driver: T,
    period: u16,
}

impl<T: ToneDriver> Buzzer<T> {
    /// Wraps `driver` and makes sure it starts silent.
    pub fn new(mut driver: T) -> Self {
        driver.set_period(0);
        Self { driver, period: 0 }
    }

    pub fn play(&mut self, period: u16) {
        if period != self.period {
            log::info!("buzzer period {}", period);
        }
        self.period = period;
        self.driver.set_period(period);
    }

    pub fn stop(&mut self) {
        self.play(0);
    }

    /// Current period, 0 when silent.
    pub fn period(&self) -> u16 {
        self.period
    }

    pub fn is_playing(&self) -> bool {
        self.period != 0
    }

    pub fn into_inner(self) -> T {
        self.driver
    }
}
