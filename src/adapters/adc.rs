//! Bank ADC sampler.
//!
//! Reads the two multiplexed bank outputs through ESP32-S3 ADC1 channels
//! using the oneshot API, rescaled to the 10-bit range the trigger
//! threshold is calibrated against.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real ADC channels (initialised on first construction).
//! On host/test: reads from static `AtomicU16`s for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::{Bank, BankSampler};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_BANK_AB: AtomicU16 = AtomicU16::new(0);
static SIM_BANK_CD: AtomicU16 = AtomicU16::new(0);

/// Inject a raw bank reading (0–1023 scale) for host-target runs.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_bank(bank: Bank, raw: u16) {
    match bank {
        Bank::AB => SIM_BANK_AB.store(raw, Ordering::Relaxed),
        Bank::CD => SIM_BANK_CD.store(raw, Ordering::Relaxed),
    }
}

// ── Error type ────────────────────────────────────────────────

/// Errors during oneshot ADC initialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcInitError {
    UnitInit(i32),
    ChannelConfig(i32),
}

impl core::fmt::Display for AdcInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnitInit(rc) => write!(f, "ADC1 unit init failed (rc={})", rc),
            Self::ChannelConfig(rc) => write!(f, "ADC1 channel config failed (rc={})", rc),
        }
    }
}

// ── Sampler ───────────────────────────────────────────────────

/// [`BankSampler`] backed by ADC1 (or simulation statics on the host).
pub struct AdcBankSampler {
    _private: (),
}

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

impl AdcBankSampler {
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, AdcInitError> {
        // SAFETY: ADC1_HANDLE is written once here, before the poll loop
        // starts; all later access is from the single-threaded main loop.
        unsafe {
            if ADC1_HANDLE.is_null() {
                let init_cfg = adc_oneshot_unit_init_cfg_t {
                    unit_id: adc_unit_t_ADC_UNIT_1,
                    ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                    ..Default::default()
                };
                let ret = adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE);
                if ret != ESP_OK as i32 {
                    return Err(AdcInitError::UnitInit(ret));
                }

                let chan_cfg = adc_oneshot_chan_cfg_t {
                    atten: adc_atten_t_ADC_ATTEN_DB_12,
                    bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
                };
                for channel in [pins::BANK_AB_ADC_CHANNEL, pins::BANK_CD_ADC_CHANNEL] {
                    let ret = adc_oneshot_config_channel(ADC1_HANDLE, channel, &chan_cfg);
                    if ret != ESP_OK as i32 {
                        return Err(AdcInitError::ChannelConfig(ret));
                    }
                }
            }
        }
        log::info!(
            "adc: ADC1 configured (CH{}=banks A/B, CH{}=banks C/D)",
            pins::BANK_AB_ADC_CHANNEL,
            pins::BANK_CD_ADC_CHANNEL
        );
        Ok(Self { _private: () })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, AdcInitError> {
        Ok(Self { _private: () })
    }

    #[cfg(target_os = "espidf")]
    fn read_channel(channel: u32) -> u16 {
        let mut raw: i32 = 0;
        // SAFETY: ADC1_HANDLE is written once during new(); single-threaded
        // main-loop access only.
        let ret = unsafe { adc_oneshot_read(ADC1_HANDLE, channel, &mut raw) };
        if ret != ESP_OK as i32 {
            return 0;
        }
        // 12-bit reading → the 10-bit scale the threshold expects.
        (raw.max(0) as u16) >> 2
    }
}

impl BankSampler for AdcBankSampler {
    #[cfg(target_os = "espidf")]
    fn sample(&mut self, bank: Bank) -> u16 {
        let channel = match bank {
            Bank::AB => pins::BANK_AB_ADC_CHANNEL,
            Bank::CD => pins::BANK_CD_ADC_CHANNEL,
        };
        Self::read_channel(channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn sample(&mut self, bank: Bank) -> u16 {
        match bank {
            Bank::AB => SIM_BANK_AB.load(Ordering::Relaxed),
            Bank::CD => SIM_BANK_CD.load(Ordering::Relaxed),
        }
    }
}
