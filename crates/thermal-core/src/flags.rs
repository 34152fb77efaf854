// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Hardware configuration flags and the output-stream identifier derived from them.
//!
//! The flags describe the enclosure and cooling setup under test. They have no
//! runtime effect beyond naming the output file and printing a summary, which
//! keeps records from different setups in separate files.

/// Labels of the hardware flags, in the fixed order used to build identifiers.
pub const FLAG_LABELS: [&str; 10] = [
    "case_under",
    "case_frame",
    "case_cable",
    "case_gpio",
    "top_solid",
    "top_hole",
    "top_intake",
    "top_exhaust",
    "heatsink_main",
    "heatsink_sub",
];

/// The enclosure and cooling configuration of the board under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HardwareFlags {
    /// The bottom of the case is on.
    pub case_under: bool,
    /// The case frame is on.
    pub case_frame: bool,
    /// The cable-side panel is on.
    pub case_cable: bool,
    /// The GPIO-side panel is on.
    pub case_gpio: bool,
    /// The top panel is on and solid.
    pub top_solid: bool,
    /// The top panel is on and has a fan hole.
    pub top_hole: bool,
    /// A fan on the case pulls air in.
    pub top_intake: bool,
    /// A fan on the case pushes air out.
    pub top_exhaust: bool,
    /// A heatsink sits on the main SoC.
    pub heatsink_main: bool,
    /// A heatsink sits on the secondary SoC.
    pub heatsink_sub: bool,
}

impl HardwareFlags {
    /// Returns the flag values in the same order as [`FLAG_LABELS`].
    pub fn bits(&self) -> [bool; 10] {
        [
            self.case_under,
            self.case_frame,
            self.case_cable,
            self.case_gpio,
            self.top_solid,
            self.top_hole,
            self.top_intake,
            self.top_exhaust,
            self.heatsink_main,
            self.heatsink_sub,
        ]
    }

    /// Renders the flags as a string of `0`/`1` digits (e.g. `"0110000000"`).
    pub fn bit_string(&self) -> String {
        self.bits()
            .iter()
            .map(|&set| if set { '1' } else { '0' })
            .collect()
    }

    /// Returns the labels of the flags that are set, in fixed order.
    pub fn active_labels(&self) -> Vec<&'static str> {
        FLAG_LABELS
            .iter()
            .zip(self.bits())
            .filter_map(|(label, set)| set.then_some(*label))
            .collect()
    }

    /// Returns a human-readable summary of the active flags.
    pub fn summary(&self) -> String {
        let active = self.active_labels();
        if active.is_empty() {
            "none".to_string()
        } else {
            active.join(", ")
        }
    }
}

/// Builds the deterministic output file name for a session.
///
/// Randomized sessions use `<prefix>_<bits>.csv`. Min/max sessions pass their
/// wait window and get `<prefix>_<bits>_w<wait>.csv`.
pub fn output_file_name(prefix: &str, flags: &HardwareFlags, wait_window: Option<u32>) -> String {
    match wait_window {
        Some(wait) => format!("{}_{}_w{}.csv", prefix, flags.bit_string(), wait),
        None => format!("{}_{}.csv", prefix, flags.bit_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_and_cable() -> HardwareFlags {
        HardwareFlags {
            case_frame: true,
            case_cable: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_bit_string_follows_fixed_order() {
        assert_eq!(HardwareFlags::default().bit_string(), "0000000000");
        assert_eq!(frame_and_cable().bit_string(), "0110000000");

        let sub_only = HardwareFlags {
            heatsink_sub: true,
            ..Default::default()
        };
        assert_eq!(sub_only.bit_string(), "0000000001");
    }

    #[test]
    fn test_output_file_name() {
        let flags = frame_and_cable();
        assert_eq!(output_file_name("pi4", &flags, None), "pi4_0110000000.csv");
        assert_eq!(
            output_file_name("pi4", &flags, Some(10)),
            "pi4_0110000000_w10.csv"
        );
    }

    #[test]
    fn test_file_name_is_pure_and_sensitive_to_every_flag() {
        let base = HardwareFlags::default();
        let reference = output_file_name("run", &base, None);
        assert_eq!(reference, output_file_name("run", &base, None));

        for index in 0..FLAG_LABELS.len() {
            let mut bits = base.bits();
            bits[index] = true;
            let flipped = HardwareFlags {
                case_under: bits[0],
                case_frame: bits[1],
                case_cable: bits[2],
                case_gpio: bits[3],
                top_solid: bits[4],
                top_hole: bits[5],
                top_intake: bits[6],
                top_exhaust: bits[7],
                heatsink_main: bits[8],
                heatsink_sub: bits[9],
            };
            assert_ne!(
                output_file_name("run", &flipped, None),
                reference,
                "flipping '{}' must change the file name",
                FLAG_LABELS[index]
            );
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(HardwareFlags::default().summary(), "none");
        assert_eq!(frame_and_cable().summary(), "case_frame, case_cable");
        assert_eq!(
            frame_and_cable().active_labels(),
            vec!["case_frame", "case_cable"]
        );
    }
}
