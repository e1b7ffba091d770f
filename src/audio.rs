//! Generated PCM16 WAV sounds and music, loaded from memory. No media
//! assets ship with the game.

use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes, set_sound_volume,
                       stop_sound};

use crate::game::Mode;

const SAMPLE_RATE: u32 = 44100;

fn wav_from_samples(samples: &[i16]) -> Vec<u8> {
    let mut data: Vec<u8> = Vec::with_capacity(samples.len() * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = samples.len() as u32 * 2;
    let chunk_size: u32 = 36 + data_size;

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

fn push_tone(samples: &mut Vec<i16>, frequency_hz: f32, duration_seconds: f32, volume: f32) {
    let num_samples = (duration_seconds * SAMPLE_RATE as f32) as u32;
    let two_pi = std::f32::consts::TAU;
    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        // Linear fade-out keeps the loop point from clicking.
        let envelope = 1.0 - t / duration_seconds;
        let value = amplitude * envelope * (two_pi * frequency_hz * t).sin();
        samples.push((value * i16::MAX as f32) as i16);
    }
}

/// Single sine beep.
fn tone_wav(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let mut samples = Vec::new();
    push_tone(&mut samples, frequency_hz, duration_seconds, volume);
    wav_from_samples(&samples)
}

/// Note sequence, used for the looping mode themes. A zero frequency is a
/// rest.
fn phrase_wav(notes: &[(f32, f32)], volume: f32) -> Vec<u8> {
    let mut samples = Vec::new();
    for &(freq, dur) in notes {
        if freq > 0.0 {
            push_tone(&mut samples, freq, dur, volume);
        } else {
            samples.extend(std::iter::repeat(0).take((dur * SAMPLE_RATE as f32) as usize));
        }
    }
    wav_from_samples(&samples)
}

// Unhurried pentatonic noodle for Classic Easy.
const THEME_CLASSIC: &[(f32, f32)] = &[
    (261.63, 0.30),
    (293.66, 0.30),
    (329.63, 0.30),
    (392.00, 0.45),
    (0.0, 0.15),
    (329.63, 0.30),
    (293.66, 0.30),
    (261.63, 0.45),
    (0.0, 0.30),
];

// Driving minor arpeggio for Modern Hard.
const THEME_MODERN: &[(f32, f32)] = &[
    (220.00, 0.15),
    (261.63, 0.15),
    (329.63, 0.15),
    (440.00, 0.15),
    (329.63, 0.15),
    (261.63, 0.15),
    (220.00, 0.15),
    (174.61, 0.15),
];

pub struct Sounds {
    start: Sound,
    eat_classic: Sound,
    eat_modern: Sound,
    death: Sound,
    music_classic: Sound,
    music_modern: Sound,
    playing_music: Option<Mode>,
    volume: f32,
}

impl Sounds {
    pub async fn load(volume: f32) -> Result<Sounds, String> {
        let load = |bytes: Vec<u8>| async move {
            load_sound_from_bytes(&bytes)
                .await
                .map_err(|err| format!("could not decode generated sound: {:?}", err))
        };
        Ok(Sounds {
            start: load(tone_wav(660.0, 0.10, 0.6)).await?,
            eat_classic: load(tone_wav(880.0, 0.08, 0.6)).await?,
            eat_modern: load(tone_wav(988.0, 0.06, 0.6)).await?,
            death: load(tone_wav(110.0, 0.25, 0.7)).await?,
            music_classic: load(phrase_wav(THEME_CLASSIC, 0.35)).await?,
            music_modern: load(phrase_wav(THEME_MODERN, 0.35)).await?,
            playing_music: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn play_once(&self, sound: &Sound, volume: f32) {
        audio::play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: volume * self.volume,
            },
        );
    }

    /// Button activation beep.
    pub fn play_start(&self) {
        self.play_once(&self.start, 0.5);
    }

    pub fn play_eat(&self, mode: Mode) {
        match mode {
            Mode::ClassicEasy => self.play_once(&self.eat_classic, 0.35),
            Mode::ModernHard => self.play_once(&self.eat_modern, 0.35),
        }
    }

    pub fn play_death(&self) {
        self.play_once(&self.death, 0.6);
    }

    fn music(&self, mode: Mode) -> &Sound {
        match mode {
            Mode::ClassicEasy => &self.music_classic,
            Mode::ModernHard => &self.music_modern,
        }
    }

    pub fn start_music(&mut self, mode: Mode) {
        self.stop_music();
        audio::play_sound(
            self.music(mode),
            PlaySoundParams {
                looped: true,
                volume: 0.5 * self.volume,
            },
        );
        self.playing_music = Some(mode);
    }

    pub fn stop_music(&mut self) {
        if let Some(mode) = self.playing_music.take() {
            stop_sound(self.music(mode));
        }
    }

    /// Silences the looping theme without losing its position; used while
    /// the game is paused.
    pub fn set_music_muted(&self, muted: bool) {
        if let Some(mode) = self.playing_music {
            let volume = if muted { 0.0 } else { 0.5 * self.volume };
            set_sound_volume(self.music(mode), volume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_declares_pcm16_mono() {
        let wav = tone_wav(440.0, 0.01, 0.5);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // format = PCM, channels = 1, bits = 16
        assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1);
        assert_eq!(u16::from_le_bytes([wav[22], wav[23]]), 1);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    }

    #[test]
    fn data_size_matches_duration() {
        let wav = tone_wav(440.0, 0.5, 0.5);
        let expected_samples = (0.5 * SAMPLE_RATE as f32) as u32;
        let declared = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(declared, expected_samples * 2);
        assert_eq!(wav.len(), 44 + declared as usize);
    }

    #[test]
    fn phrase_concatenates_notes_and_rests() {
        let wav = phrase_wav(&[(440.0, 0.1), (0.0, 0.1)], 0.5);
        let declared = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        let expected_samples = 2 * (0.1 * SAMPLE_RATE as f32) as u32;
        assert_eq!(declared, expected_samples * 2);
        // The rest is silent.
        let rest_start = 44 + expected_samples as usize; // halfway into the data chunk
        assert!(wav[rest_start..].iter().all(|&b| b == 0));
    }
}
