//! STM32H750 SAI/DMA audio adapter.
//!
//! Thin glue between the DMA half/complete-transfer interrupt and the
//! hardware-independent [`crate::stream::StreamPool`]. All buffer-mode and
//! priority-arbitration logic lives in `stream`; this module only moves
//! samples between the DMA-accessible static buffer and the pool, and
//! converts the codec's 24-bit I2S word format to the `i16` PCM the M17
//! pipeline runs on.
//!
//! Clock tree and DMA stream setup follow the same board wiring as the
//! originating Daisy support crate (SAI1 in I2S master mode, DMA1 streams
//! 0/1, circular double-buffering in SRAM3). Only the RX path is wired here:
//! the M17 baseband pipeline in `openrtx_dsp` is pull-based (`getData`),
//! whereas TX playback reuses the same DMA/ISR pattern against the output
//! pool.

use core::{mem::MaybeUninit, ptr};

use stm32h7xx_hal::{
    dma::{
        self, DBTransfer, PeripheralToMemory, Transfer,
        dma::{DmaConfig, StreamsTuple},
    },
    gpio::{Alternate, gpioe},
    pac::{self, DMA1, SAI1, interrupt},
    prelude::*,
    rcc::{CoreClocks, rec},
    sai::{self, I2sUsers, SaiChannel, SaiI2sExt},
    time::Hertz,
};

use crate::clock::SampleRate;
use crate::stream::StreamPool;

/// Samples per DMA half (1ms at 48kHz).
pub const BLOCK_SIZE: usize = 48;

/// Full double-buffer length in 24-bit-in-u32 I2S words.
const DMA_BUFFER_LENGTH: usize = BLOCK_SIZE * 2;

#[unsafe(link_section = ".sram3")]
static mut RX_BUFFER: MaybeUninit<[u32; DMA_BUFFER_LENGTH]> = MaybeUninit::uninit();

/// Deinterleaved PCM samples handed to the M17 RX pipeline.
#[unsafe(link_section = ".sram3")]
static mut RX_PCM: MaybeUninit<[i16; DMA_BUFFER_LENGTH]> = MaybeUninit::uninit();

type DmaRxTransfer = Transfer<
    dma::dma::Stream1<DMA1>,
    sai::dma::ChannelB<SAI1>,
    PeripheralToMemory,
    &'static mut [u32; DMA_BUFFER_LENGTH],
    DBTransfer,
>;

static mut DMA_RX_TRANSFER: MaybeUninit<Option<DmaRxTransfer>> = MaybeUninit::uninit();

/// The input stream pool this adapter feeds. Owned by application code and
/// registered via [`attach_input_pool`]; the ISR only ever touches it
/// through the atomic-free single-threaded interrupt context, matching the
/// originating crate's `AUDIO_CALLBACK` pattern.
static mut INPUT_POOL: MaybeUninit<Option<*mut StreamPool>> = MaybeUninit::uninit();

/// Registers the pool the DMA interrupt should deliver completed buffers
/// to. Must be called before `init_and_start`.
///
/// # Safety
/// The pointee must outlive the audio interface and must not be accessed
/// from anywhere but the DMA1_STR1 interrupt and this setup call.
pub unsafe fn attach_input_pool(pool: *mut StreamPool) {
    unsafe {
        let ptr = ptr::addr_of_mut!(INPUT_POOL);
        (*ptr).write(Some(pool));
    }
}

/// Initializes SAI1 RX in I2S slave mode and starts circular double-buffered
/// DMA capture.
pub fn init_and_start(
    sample_rate: SampleRate,
    sai1: SAI1,
    dma1: DMA1,
    dma1_rec: rec::Dma1,
    sai1_pins: (
        gpioe::PE2<Alternate<6>>,
        gpioe::PE5<Alternate<6>>,
        gpioe::PE4<Alternate<6>>,
        gpioe::PE6<Alternate<6>>,
        Option<gpioe::PE3<Alternate<6>>>,
    ),
    sai1_rec: rec::Sai1,
    clocks: &CoreClocks,
) {
    let rx_buffer: &'static mut [u32; DMA_BUFFER_LENGTH] = unsafe {
        let rx_ptr = ptr::addr_of_mut!(RX_BUFFER);
        let buf = (*rx_ptr).assume_init_mut();
        buf.fill(0);
        buf
    };

    unsafe {
        let ptr = ptr::addr_of_mut!(RX_PCM);
        (*ptr).write([0; DMA_BUFFER_LENGTH]);
        let transfer_ptr = ptr::addr_of_mut!(DMA_RX_TRANSFER);
        (*transfer_ptr).write(None);
    }

    let dma1_streams = StreamsTuple::new(dma1, dma1_rec);
    let rx_dma_channel = unsafe { pac::Peripherals::steal().SAI1.dma_ch_b() };

    let dma_config = DmaConfig::default()
        .priority(dma::config::Priority::High)
        .memory_increment(true)
        .peripheral_increment(false)
        .circular_buffer(true)
        .fifo_enable(false)
        .transfer_complete_interrupt(true)
        .half_transfer_interrupt(true);

    let mut dma1_str1: Transfer<_, _, PeripheralToMemory, _, _> =
        Transfer::init(dma1_streams.1, rx_dma_channel, rx_buffer, None, dma_config);

    let sai1_rx_config = sai::I2SChanConfig::new(sai::I2SDir::Rx)
        .set_frame_sync_active_high(true)
        .set_clock_strobe(sai::I2SClockStrobe::Rising);
    let sai1_tx_config = sai::I2SChanConfig::new(sai::I2SDir::Tx)
        .set_sync_type(sai::I2SSync::Internal)
        .set_frame_sync_active_high(true)
        .set_clock_strobe(sai::I2SClockStrobe::Falling);

    let sample_rate_hz = Hertz::from_raw(sample_rate.hz());
    let sai1 = sai1.i2s_ch_a(
        sai1_pins,
        sample_rate_hz,
        sai::I2SDataSize::BITS_24,
        sai1_rec,
        clocks,
        I2sUsers::new(sai1_tx_config).add_slave(sai1_rx_config),
    );

    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::DMA1_STR1);
    }

    dma1_str1.start(|_sai1_rb| {
        sai1.enable_dma(SaiChannel::ChannelB);
        sai1.enable();
    });

    unsafe {
        let transfer_ptr = ptr::addr_of_mut!(DMA_RX_TRANSFER);
        (*transfer_ptr).write(Some(dma1_str1));
    }
}

/// Converts a 24-bit-in-u32 I2S word (unsigned, codec convention) to `i16`
/// PCM, truncating the low 8 bits.
#[inline(always)]
fn i2s24_to_pcm16(sample: u32) -> i16 {
    let signed = (sample as i32).wrapping_sub(0x0080_0000);
    (signed >> 8) as i16
}

#[inline(always)]
unsafe fn deliver_half(buffer_half: usize) {
    let rx_ptr = ptr::addr_of_mut!(RX_BUFFER);
    let pcm_ptr = ptr::addr_of_mut!(RX_PCM);
    let rx_buffer = unsafe { (*rx_ptr).assume_init_mut() };
    let pcm = unsafe { (*pcm_ptr).assume_init_mut() };

    unsafe {
        cortex_m::Peripherals::steal().SCB.invalidate_dcache_by_slice(rx_buffer);
    }

    let offset = buffer_half * BLOCK_SIZE;
    for i in 0..BLOCK_SIZE {
        pcm[offset + i] = i2s24_to_pcm16(rx_buffer[offset + i]);
    }

    let pool_ptr = ptr::addr_of_mut!(INPUT_POOL);
    if let Some(Some(pool)) = (*pool_ptr).assume_init_mut() {
        let pool = unsafe { &mut **pool };
        // id 0: the RX path owns a single slot for the hardware's one
        // physical input stream.
        let id = crate::stream::StreamId::from_raw(0);
        let _ = pool.on_transfer_complete(id, &pcm[..]);
    }
}

#[interrupt]
fn DMA1_STR1() {
    let transfer_ptr = ptr::addr_of_mut!(DMA_RX_TRANSFER);
    let transfer = unsafe { (*transfer_ptr).assume_init_mut() };

    if let Some(transfer) = transfer {
        let buffer_half = if transfer.get_half_transfer_flag() {
            transfer.clear_half_transfer_interrupt();
            0
        } else if transfer.get_transfer_complete_flag() {
            transfer.clear_transfer_complete_interrupt();
            1
        } else {
            return;
        };

        unsafe {
            deliver_half(buffer_half);
        }
    }
}

pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 24_000;
