//! Host side of a narrow serial state/memory link.
//!
//! The device streams frames to the host over an `io_bits`-wide bus, one
//! sample per clock. Each frame is a start cycle, a header cycle carrying a
//! command, and a payload word. The host acts on the command and answers on
//! its own transmit lines with a status code followed by a reply word:
//!
//! | Command | Payload         | Host action                       | Reply            |
//! |---------|-----------------|-----------------------------------|------------------|
//! | SCAN    | new state word  | swap into the state ring          | old state word   |
//! | OUT     | output sample   | publish, raise the new-sample flag | credit refill write |
//! | READ    | memory address  | none                              | memory word      |
//!
//! Everything is clocked by the caller through [`BitSerial::advance`]. The
//! engine is cycle-exact: the reply's status code goes out on the same clock
//! that completes the frame.

mod error;
mod framer;
mod geometry;
pub mod peer;
mod protocol;
mod ring;
mod shifter;
mod trace;

pub use error::GeometryError;
pub use framer::{Frame, RxFramer, RxPhase};
pub use geometry::LinkGeometry;
pub use protocol::{
    Command, REG_ADDR_SAMPLE_CREDITS, Reply, ReplyStatus, SAMPLE_CREDIT_REFILL,
};
pub use ring::{StateRing, wrap_cursor};
pub use shifter::TxShifter;

pub use sim_core::{BitSerial, BusCycle, Observable, Value, WordMemory};

/// Host end of the link.
///
/// Owns the framing state, the transmit register and the state ring. The
/// memory is only ever read; `M` may be a borrowed slice so the caller keeps
/// ownership.
pub struct HostLink<M> {
    geometry: LinkGeometry,
    memory: M,
    framer: RxFramer,
    shifter: TxShifter,
    ring: StateRing,

    /// Last published output sample (raw word).
    sample: u32,
    /// Set by OUT, cleared by the caller.
    new_sample: bool,

    cycles: BusCycle,
    frames: u64,
    ignored_frames: u64,
}

impl<M: WordMemory> HostLink<M> {
    pub fn new(geometry: LinkGeometry, memory: M) -> Result<Self, GeometryError> {
        geometry.validate()?;
        Ok(Self::build(geometry, memory))
    }

    /// 2-bit link, 16-bit words, 36 + 12 state words.
    #[must_use]
    pub fn with_default_geometry(memory: M) -> Self {
        Self::build(LinkGeometry::default(), memory)
    }

    fn build(geometry: LinkGeometry, memory: M) -> Self {
        Self {
            geometry,
            memory,
            framer: RxFramer::new(&geometry),
            shifter: TxShifter::new(&geometry),
            ring: StateRing::new(geometry.state_words, geometry.full_state_words),
            sample: 0,
            new_sample: false,
            cycles: BusCycle::ZERO,
            frames: 0,
            ignored_frames: 0,
        }
    }

    fn dispatch(&mut self, frame: Frame) {
        self.frames += 1;
        let Some(command) = Command::from_header(frame.header) else {
            self.ignored_frames += 1;
            if trace::frames_enabled() {
                eprintln!(
                    "[host-link] cycle={} ignored header={:#X} payload={:#X}",
                    self.cycles, frame.header, frame.payload
                );
            }
            return;
        };

        let reply = match command {
            Command::Scan => {
                let slot = self.ring.cursor();
                let old = self.ring.exchange(frame.payload);
                if trace::frames_enabled() {
                    eprintln!(
                        "[host-link] cycle={} SCAN slot={slot} old={old:#06X} new={:#06X}",
                        self.cycles, frame.payload
                    );
                }
                Reply::scan(old)
            }
            Command::Read => {
                let address = frame.payload;
                let word = self.memory.read_word(address) & self.geometry.word_mask();
                if trace::frames_enabled() {
                    let mirror = if self.memory.contains(address) {
                        ""
                    } else {
                        " (out of range, mirrored)"
                    };
                    eprintln!(
                        "[host-link] cycle={} READ addr={address:#06X} word={word:#06X}{mirror}",
                        self.cycles
                    );
                }
                Reply::read(word)
            }
            Command::Out => {
                self.sample = frame.payload;
                self.new_sample = true;
                if trace::frames_enabled() {
                    eprintln!(
                        "[host-link] cycle={} OUT sample={} raw={:#06X}",
                        self.cycles,
                        self.sample_signed(),
                        frame.payload
                    );
                }
                Reply::credit_refill()
            }
        };
        self.shifter.load(reply);
    }

    #[must_use]
    pub fn geometry(&self) -> &LinkGeometry {
        &self.geometry
    }

    /// True once an OUT frame has published a sample the caller has not
    /// yet cleared.
    #[must_use]
    pub fn new_sample(&self) -> bool {
        self.new_sample
    }

    pub fn clear_new_sample(&mut self) {
        self.new_sample = false;
    }

    /// Most recent output sample as received.
    #[must_use]
    pub fn sample(&self) -> u32 {
        self.sample
    }

    /// Most recent output sample, sign-extended from the word width.
    #[must_use]
    pub fn sample_signed(&self) -> i32 {
        let unused = 32 - self.geometry.word_bits();
        ((self.sample << unused) as i32) >> unused
    }

    /// Read and clear the new-sample flag in one go.
    pub fn take_sample(&mut self) -> Option<i32> {
        if std::mem::take(&mut self.new_sample) {
            Some(self.sample_signed())
        } else {
            None
        }
    }

    #[must_use]
    pub fn ring(&self) -> &StateRing {
        &self.ring
    }

    /// Seed or inspect state words between cycles.
    pub fn ring_mut(&mut self) -> &mut StateRing {
        &mut self.ring
    }

    #[must_use]
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// The engine never writes memory; this is for the owner to update it
    /// between cycles.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    #[must_use]
    pub fn rx_phase(&self) -> RxPhase {
        self.framer.phase()
    }

    /// Transmit bits not yet shifted out.
    #[must_use]
    pub fn tx_residual(&self) -> u64 {
        self.shifter.residual()
    }

    /// Clocks advanced so far.
    #[must_use]
    pub fn cycles(&self) -> BusCycle {
        self.cycles
    }

    /// Completed receive frames, including ignored ones.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Completed frames whose header was not a command.
    #[must_use]
    pub fn ignored_frames(&self) -> u64 {
        self.ignored_frames
    }
}

impl<M: WordMemory> BitSerial for HostLink<M> {
    /// One bus clock: receive `inbound`, act on a completed frame, and
    /// return this clock's transmit bits.
    fn advance(&mut self, inbound: u8) -> u8 {
        if let Some(frame) = self.framer.clock(inbound) {
            self.dispatch(frame);
        }
        self.cycles += 1;
        self.shifter.shift_out()
    }
}

impl<M: WordMemory> Observable for HostLink<M> {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(rest) = path.strip_prefix("rx.") {
            match rest {
                "counter" => Some(self.framer.counter().into()),
                "header" => Some(self.framer.header().into()),
                "payload" => Some(self.framer.accumulator().into()),
                "phase" => Some(
                    match self.framer.phase() {
                        RxPhase::Idle => "idle",
                        RxPhase::Header => "header",
                        RxPhase::Payload(_) => "payload",
                    }
                    .into(),
                ),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("tx.") {
            match rest {
                "shift" => Some(self.shifter.residual().into()),
                "drained" => Some(self.shifter.is_drained().into()),
                _ => None,
            }
        } else if let Some(rest) = path.strip_prefix("ring.") {
            match rest {
                "cursor" => Some((self.ring.cursor() as u64).into()),
                "words" => Some(Value::Array(
                    self.ring.words().iter().map(|&w| Value::U32(w)).collect(),
                )),
                slot => slot
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| self.ring.get(i))
                    .map(Value::U32),
            }
        } else if let Some(rest) = path.strip_prefix("out.") {
            match rest {
                "sample" => Some(self.sample_signed().into()),
                "raw" => Some(self.sample.into()),
                "new" => Some(self.new_sample.into()),
                _ => None,
            }
        } else {
            match path {
                "cycles" => Some(self.cycles.get().into()),
                "frames" => Some(self.frames.into()),
                "ignored_frames" => Some(self.ignored_frames.into()),
                _ => None,
            }
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "rx.counter",
            "rx.header",
            "rx.payload",
            "rx.phase",
            "tx.shift",
            "tx.drained",
            "ring.cursor",
            "ring.words",
            "ring.<0-full_state_words>",
            "out.sample",
            "out.raw",
            "out.new",
            "cycles",
            "frames",
            "ignored_frames",
        ]
    }
}
