use crate::{
    a10c::{
        names::{CDU, MARKER_RADIO, UHF},
        pages::{self, ARC210_PRESETS, ARC210_PRESET_DESC, ARC210_PRESET_FREQ, ARC210_PRESET_NUM, SYS_ARC210},
        systems::radio::{
            RadioKind, RadioPreset, RadioSettings, arc164_knobs, arc164_preset_knob,
            normalize_frequency,
        },
    },
    builder::{BuildContext, Builder},
    config::SystemSettings,
    error::BuildError,
    stream::CommandStream,
};

/// UHF frequency knobs, most significant first.
const ARC164_FREQ_KNOBS: [&str; 5] = [
    "FREQ_100MHZ",
    "FREQ_10MHZ",
    "FREQ_1MHZ",
    "FREQ_01MHZ",
    "FREQ_25KHZ",
];
// UHF FREQ_MODE positions: MNL, PRESET, GRD
const ARC164_MODE_PRESET: f64 = 0.1;

fn check_arc164_initial(n: u32) -> Result<(), BuildError> {
    let count = RadioKind::Arc164.preset_count();
    if n == 0 || n > count {
        return Err(BuildError::OutOfRange {
            field: "arc164_initial_preset",
            value: n as usize,
            limit: count as usize + 1,
        });
    }
    Ok(())
}

/// ARC-210 presets through the CDU preset table, ARC-164 presets on the UHF panel.
pub struct RadioBuilder<'a> {
    ctx: &'a BuildContext,
    radio: &'a RadioSettings,
}

impl<'a> RadioBuilder<'a> {
    pub fn new(ctx: &'a BuildContext, radio: &'a RadioSettings) -> Self {
        Self { ctx, radio }
    }

    /// CDU SYS -> ARC-210 -> PRESETS. Per preset: number, frequency, description.
    fn build_arc210(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.radio.arc210_presets.is_empty() {
            return Ok(());
        }
        pages::cdu_clear_scratchpad(stream)?;
        pages::cdu_sys_page(stream, SYS_ARC210)?;
        stream.add_action(CDU, ARC210_PRESETS)?;

        for p in &self.radio.arc210_presets {
            p.check_preset(RadioKind::Arc210)?;
            let freq = normalize_frequency(&p.frequency)?;
            let desc = p.checked_description()?;

            pages::cdu_enter(stream, &p.preset.to_string(), ARC210_PRESET_NUM)?;
            stream.add_digits(CDU, &freq)?;
            stream.add_action(CDU, ARC210_PRESET_FREQ)?;
            if !desc.is_empty() {
                pages::cdu_enter(stream, desc, ARC210_PRESET_DESC)?;
            }
        }
        stream.add_repeated(CDU, "BCK", 2)
    }

    /// Knobs to each preset's frequency, LOAD, then leave the panel on the initial preset.
    fn build_arc164(&self, stream: &mut CommandStream) -> Result<(), BuildError> {
        let presets = &self.radio.arc164_presets;
        let initial = self.radio.arc164_initial_preset;
        if presets.is_empty() && initial.is_none() {
            return Ok(());
        }

        if !presets.is_empty() {
            stream.add_dynamic_action(UHF, "COVER", 1.0, 0.0)?;
            for p in presets {
                self.load_arc164(stream, p)?;
            }
            stream.add_dynamic_action(UHF, "COVER", 0.0, 0.0)?;
        }

        match initial {
            Some(n) => {
                check_arc164_initial(n)?;
                stream.add_dynamic_action(UHF, "FREQ_MODE", ARC164_MODE_PRESET, 0.0)?;
                stream.add_dynamic_action(UHF, "PRESET_KNOB", arc164_preset_knob(n), 0.0)?;
            }
            None => stream.add_dynamic_action(UHF, "PRESET_KNOB", arc164_preset_knob(1), 0.0)?,
        }
        Ok(())
    }

    fn load_arc164(&self, stream: &mut CommandStream, p: &RadioPreset) -> Result<(), BuildError> {
        p.check_preset(RadioKind::Arc164)?;
        let knobs = arc164_knobs(&p.frequency)?;
        stream.add_dynamic_action(UHF, "PRESET_KNOB", arc164_preset_knob(p.preset), 0.0)?;
        for (knob, v) in ARC164_FREQ_KNOBS.iter().zip(knobs) {
            stream.add_dynamic_action(UHF, knob, v, 0.0)?;
        }
        stream.add_action(UHF, "LOAD")
    }
}

impl Builder for RadioBuilder<'_> {
    fn name(&self) -> &'static str {
        "Radio"
    }

    fn validate(&self) -> Result<(), BuildError> {
        for p in &self.radio.arc210_presets {
            p.check_preset(RadioKind::Arc210)?;
            normalize_frequency(&p.frequency)?;
            p.checked_description()?;
        }
        for p in &self.radio.arc164_presets {
            p.check_preset(RadioKind::Arc164)?;
            arc164_knobs(&p.frequency)?;
        }
        if let Some(n) = self.radio.arc164_initial_preset {
            check_arc164_initial(n)?;
        }
        Ok(())
    }

    fn build(&mut self, stream: &mut CommandStream) -> Result<(), BuildError> {
        if self.radio.is_default() {
            return Ok(());
        }
        stream.add_marker(MARKER_RADIO);
        self.build_arc210(stream)?;
        self.build_arc164(stream)?;
        if !self.radio.arc186_presets.is_empty() {
            // The receiver cannot report ARC-186 state yet, so its presets stay untouched.
            self.ctx.log.debug(&format!(
                "[radio] {} ARC-186 presets not uploaded",
                self.radio.arc186_presets.len()
            ));
        }
        Ok(())
    }
}
