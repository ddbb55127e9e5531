use crate::alarm::AlarmBank;
use crate::config::MAX_ALARMS;
use crate::ui::bitmap::Bitmap;
use crate::ui::widgets::{Frame, Widget};

/// One column per alarm, one pixel per enabled weekday (Monday on top).
pub struct AlarmDays {
    frame: Frame,
    count: usize,
    days: [u8; MAX_ALARMS],
    current: Option<usize>,
}

impl AlarmDays {
    pub const fn new(count: usize) -> Self {
        let count = if count > MAX_ALARMS { MAX_ALARMS } else { count };
        Self {
            // Extra column for spacing.
            frame: Frame::new(count as u32 + 1, 7),
            count,
            days: [0; MAX_ALARMS],
            current: None,
        }
    }

    /// Show a single alarm, or all of them with `None`.
    pub fn set_current(&mut self, current: Option<usize>) {
        self.current = current.filter(|&i| i < self.count);
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Copy the day masks out of the alarm table.
    pub fn load(&mut self, alarms: &AlarmBank) {
        for (slot, mask) in alarms.day_masks().into_iter().enumerate().take(self.count) {
            self.days[slot] = mask;
        }
    }
}

impl Widget for AlarmDays {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn draw(&mut self, canvas: &mut Bitmap) {
        self.frame.clear(canvas);
        let columns = match self.current {
            Some(i) => i..i + 1,
            None => 0..self.count,
        };
        let mut region = self.frame.region(canvas);
        for column in columns {
            for day in 0..7 {
                if self.days[column] >> day & 1 != 0 {
                    region.set_pixel(column as i32, day);
                }
            }
        }
    }

    fn set(&mut self, value: u16) {
        if let Some(i) = self.current {
            self.days[i] = value as u8;
        }
    }

    fn get(&self) -> Option<u16> {
        self.current.map(|i| self.days[i] as u16)
    }
}
