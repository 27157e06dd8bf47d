//! Switch sampling and the switch-to-paddle mapping.

/// Number of switches on the board.
pub const SWITCH_COUNT: u8 = 4;

/// Raw switch levels, one bit per switch, sampled once per tick.
///
/// Active-low: a clear bit means the switch is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchMask(pub u8);

impl SwitchMask {
    pub const RELEASED: Self = SwitchMask(0xff);

    /// Builds the mask from "is held" flags, switch 0 first.
    pub fn from_pressed(pressed: [bool; SWITCH_COUNT as usize]) -> Self {
        let mut bits = 0xff;
        for (i, held) in pressed.into_iter().enumerate() {
            if held {
                bits &= !(1 << i);
            }
        }
        SwitchMask(bits)
    }

    pub fn is_pressed(self, switch: u8) -> bool {
        switch < 8 && self.0 & (1 << switch) == 0
    }

    /// Held switches, lowest index first.
    pub fn pressed(self) -> impl Iterator<Item = u8> {
        (0..SWITCH_COUNT).filter(move |&i| self.is_pressed(i))
    }

    pub fn any_pressed(self) -> bool {
        self.pressed().next().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Paddle {
    Left,
    Right,
}

/// Vertical velocity to give a paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PaddleCommand {
    pub paddle: Paddle,
    pub velocity_y: i32,
}

/// Switch 0/1 move the left paddle up/down, switch 2/3 move the right paddle
/// down/up.
pub fn command_for(switch: u8, speed: i32) -> Option<PaddleCommand> {
    let (paddle, velocity_y) = match switch {
        0 => (Paddle::Left, -speed),
        1 => (Paddle::Left, speed),
        2 => (Paddle::Right, speed),
        3 => (Paddle::Right, -speed),
        _ => return None,
    };
    Some(PaddleCommand { paddle, velocity_y })
}
