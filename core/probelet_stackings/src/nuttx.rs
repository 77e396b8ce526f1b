//! NuttX stacking descriptors.
//!
//! One compiled-in [`Stacking`] per supported core, matching the frames
//! produced by the NuttX context-save path (`exception_common` on Arm,
//! the Xtensa interrupt vectors on ESP32 parts). Register lists follow
//! the GDB feature order of each architecture, which is also the
//! canonical output order of this crate.
//!
//! ## License
//!
//! SPDX-License-Identifier: Apache-2.0
use crate::stacking::{stacked, unstacked, Fixup, ReadStrategy, RegisterOffset, StackGrowth, Stacking};

/// NuttX symbol holding the per-register frame offsets for the running
/// build, one `u16` per canonical register.
pub const REG_OFFSETS_SYMBOL: &str = "g_reg_offs";

// Output buffer offsets referenced by the Cortex-M fixup. Must match
// CORTEX_M_REGISTERS below.
const CORTEX_M_SP_OFFSET: usize = 52;
const CORTEX_M_XPSR_OFFSET: usize = 64;

const CORTEX_M_REGISTERS: [RegisterOffset; 17] = [
    stacked(0, 0, 32),   // r0
    stacked(1, 4, 32),   // r1
    stacked(2, 8, 32),   // r2
    stacked(3, 12, 32),  // r3
    stacked(4, 16, 32),  // r4
    stacked(5, 20, 32),  // r5
    stacked(6, 24, 32),  // r6
    stacked(7, 28, 32),  // r7
    stacked(8, 32, 32),  // r8
    stacked(9, 36, 32),  // r9
    stacked(10, 40, 32), // r10
    stacked(11, 44, 32), // r11
    stacked(12, 48, 32), // r12
    stacked(13, 52, 32), // sp
    stacked(14, 56, 32), // lr
    stacked(15, 60, 32), // pc
    stacked(16, 64, 32), // xPSR
];

/// Cortex-M NuttX stacking.
///
/// The frame's register offsets change with the NuttX version, FPU
/// configuration, and ARMv7 vs ARMv8, so the frame is read through the
/// offset table the firmware publishes as [`REG_OFFSETS_SYMBOL`] rather
/// than hard-coded offsets; one descriptor then covers many builds. The
/// stored SP reflects any 8-byte alignment the hardware applied on
/// exception entry (recorded in xPSR[9]), which the fixup undoes, so no
/// pre-read alignment is declared.
pub const CORTEX_M: Stacking = Stacking {
    frame_size: CORTEX_M_REGISTERS.len() * 4,
    growth: StackGrowth::Down,
    registers: &CORTEX_M_REGISTERS,
    strategy: ReadStrategy::OffsetTable { offsets_symbol: REG_OFFSETS_SYMBOL },
    fixup: Some(Fixup::ExceptionStackAlign { xpsr_offset: CORTEX_M_XPSR_OFFSET, sp_offset: CORTEX_M_SP_OFFSET }),
    frame_align: None,
};

// In the Xtensa tables below, a16-a63 are never in the frame because the
// window save already flushed them to the stack, and the remaining
// unstacked entries are special registers the port does not save.

const ESP32_REGISTERS: [RegisterOffset; 105] = [
    stacked(0, 0x00, 32),  // pc
    stacked(1, 0x08, 32),  // a0
    stacked(2, 0x0c, 32),  // a1
    stacked(3, 0x10, 32),  // a2
    stacked(4, 0x14, 32),  // a3
    stacked(5, 0x18, 32),  // a4
    stacked(6, 0x1c, 32),  // a5
    stacked(7, 0x20, 32),  // a6
    stacked(8, 0x24, 32),  // a7
    stacked(9, 0x28, 32),  // a8
    stacked(10, 0x2c, 32), // a9
    stacked(11, 0x30, 32), // a10
    stacked(12, 0x34, 32), // a11
    stacked(13, 0x38, 32), // a12
    stacked(14, 0x3c, 32), // a13
    stacked(15, 0x40, 32), // a14
    stacked(16, 0x44, 32), // a15
    unstacked(17, 32),     // a16
    unstacked(18, 32),     // a17
    unstacked(19, 32),     // a18
    unstacked(20, 32),     // a19
    unstacked(21, 32),     // a20
    unstacked(22, 32),     // a21
    unstacked(23, 32),     // a22
    unstacked(24, 32),     // a23
    unstacked(25, 32),     // a24
    unstacked(26, 32),     // a25
    unstacked(27, 32),     // a26
    unstacked(28, 32),     // a27
    unstacked(29, 32),     // a28
    unstacked(30, 32),     // a29
    unstacked(31, 32),     // a30
    unstacked(32, 32),     // a31
    unstacked(33, 32),     // a32
    unstacked(34, 32),     // a33
    unstacked(35, 32),     // a34
    unstacked(36, 32),     // a35
    unstacked(37, 32),     // a36
    unstacked(38, 32),     // a37
    unstacked(39, 32),     // a38
    unstacked(40, 32),     // a39
    unstacked(41, 32),     // a40
    unstacked(42, 32),     // a41
    unstacked(43, 32),     // a42
    unstacked(44, 32),     // a43
    unstacked(45, 32),     // a44
    unstacked(46, 32),     // a45
    unstacked(47, 32),     // a46
    unstacked(48, 32),     // a47
    unstacked(49, 32),     // a48
    unstacked(50, 32),     // a49
    unstacked(51, 32),     // a50
    unstacked(52, 32),     // a51
    unstacked(53, 32),     // a52
    unstacked(54, 32),     // a53
    unstacked(55, 32),     // a54
    unstacked(56, 32),     // a55
    unstacked(57, 32),     // a56
    unstacked(58, 32),     // a57
    unstacked(59, 32),     // a58
    unstacked(60, 32),     // a59
    unstacked(61, 32),     // a60
    unstacked(62, 32),     // a61
    unstacked(63, 32),     // a62
    unstacked(64, 32),     // a63
    stacked(65, 0x58, 32), // lbeg
    stacked(66, 0x5c, 32), // lend
    stacked(67, 0x60, 32), // lcount
    stacked(68, 0x48, 32), // sar
    unstacked(69, 32),     // windowbase
    unstacked(70, 32),     // windowstart
    unstacked(71, 32),     // configid0
    unstacked(72, 32),     // configid1
    stacked(73, 0x04, 32), // ps
    unstacked(74, 32),     // threadptr
    unstacked(75, 32),     // br
    stacked(76, 0x54, 32), // scompare1
    unstacked(77, 32),     // acclo
    unstacked(78, 32),     // acchi
    unstacked(79, 32),     // m0
    unstacked(80, 32),     // m1
    unstacked(81, 32),     // m2
    unstacked(82, 32),     // m3
    unstacked(83, 32),     // expstate
    unstacked(84, 32),     // f64r_lo
    unstacked(85, 32),     // f64r_hi
    unstacked(86, 32),     // f64s
    unstacked(87, 32),     // f0
    unstacked(88, 32),     // f1
    unstacked(89, 32),     // f2
    unstacked(90, 32),     // f3
    unstacked(91, 32),     // f4
    unstacked(92, 32),     // f5
    unstacked(93, 32),     // f6
    unstacked(94, 32),     // f7
    unstacked(95, 32),     // f8
    unstacked(96, 32),     // f9
    unstacked(97, 32),     // f10
    unstacked(98, 32),     // f11
    unstacked(99, 32),     // f12
    unstacked(100, 32),    // f13
    unstacked(101, 32),    // f14
    unstacked(102, 32),    // f15
    unstacked(103, 32),    // fcr
    unstacked(104, 32),    // fsr
];

const ESP32S2_REGISTERS: [RegisterOffset; 73] = [
    stacked(0, 0x00, 32),  // pc
    stacked(1, 0x08, 32),  // a0
    stacked(2, 0x0c, 32),  // a1
    stacked(3, 0x10, 32),  // a2
    stacked(4, 0x14, 32),  // a3
    stacked(5, 0x18, 32),  // a4
    stacked(6, 0x1c, 32),  // a5
    stacked(7, 0x20, 32),  // a6
    stacked(8, 0x24, 32),  // a7
    stacked(9, 0x28, 32),  // a8
    stacked(10, 0x2c, 32), // a9
    stacked(11, 0x30, 32), // a10
    stacked(12, 0x34, 32), // a11
    stacked(13, 0x38, 32), // a12
    stacked(14, 0x3c, 32), // a13
    stacked(15, 0x40, 32), // a14
    stacked(16, 0x44, 32), // a15
    unstacked(17, 32),     // a16
    unstacked(18, 32),     // a17
    unstacked(19, 32),     // a18
    unstacked(20, 32),     // a19
    unstacked(21, 32),     // a20
    unstacked(22, 32),     // a21
    unstacked(23, 32),     // a22
    unstacked(24, 32),     // a23
    unstacked(25, 32),     // a24
    unstacked(26, 32),     // a25
    unstacked(27, 32),     // a26
    unstacked(28, 32),     // a27
    unstacked(29, 32),     // a28
    unstacked(30, 32),     // a29
    unstacked(31, 32),     // a30
    unstacked(32, 32),     // a31
    unstacked(33, 32),     // a32
    unstacked(34, 32),     // a33
    unstacked(35, 32),     // a34
    unstacked(36, 32),     // a35
    unstacked(37, 32),     // a36
    unstacked(38, 32),     // a37
    unstacked(39, 32),     // a38
    unstacked(40, 32),     // a39
    unstacked(41, 32),     // a40
    unstacked(42, 32),     // a41
    unstacked(43, 32),     // a42
    unstacked(44, 32),     // a43
    unstacked(45, 32),     // a44
    unstacked(46, 32),     // a45
    unstacked(47, 32),     // a46
    unstacked(48, 32),     // a47
    unstacked(49, 32),     // a48
    unstacked(50, 32),     // a49
    unstacked(51, 32),     // a50
    unstacked(52, 32),     // a51
    unstacked(53, 32),     // a52
    unstacked(54, 32),     // a53
    unstacked(55, 32),     // a54
    unstacked(56, 32),     // a55
    unstacked(57, 32),     // a56
    unstacked(58, 32),     // a57
    unstacked(59, 32),     // a58
    unstacked(60, 32),     // a59
    unstacked(61, 32),     // a60
    unstacked(62, 32),     // a61
    unstacked(63, 32),     // a62
    unstacked(64, 32),     // a63
    stacked(65, 0x48, 32), // sar
    unstacked(66, 32),     // windowbase
    unstacked(67, 32),     // windowstart
    unstacked(68, 32),     // configid0
    unstacked(69, 32),     // configid1
    stacked(70, 0x04, 32), // ps
    unstacked(71, 32),     // threadptr
    unstacked(72, 32),     // gpio_out
];

const ESP32S3_REGISTERS: [RegisterOffset; 128] = [
    stacked(0, 0x00, 32),  // pc
    stacked(1, 0x08, 32),  // a0
    stacked(2, 0x0c, 32),  // a1
    stacked(3, 0x10, 32),  // a2
    stacked(4, 0x14, 32),  // a3
    stacked(5, 0x18, 32),  // a4
    stacked(6, 0x1c, 32),  // a5
    stacked(7, 0x20, 32),  // a6
    stacked(8, 0x24, 32),  // a7
    stacked(9, 0x28, 32),  // a8
    stacked(10, 0x2c, 32), // a9
    stacked(11, 0x30, 32), // a10
    stacked(12, 0x34, 32), // a11
    stacked(13, 0x38, 32), // a12
    stacked(14, 0x3c, 32), // a13
    stacked(15, 0x40, 32), // a14
    stacked(16, 0x44, 32), // a15
    unstacked(17, 32),     // a16
    unstacked(18, 32),     // a17
    unstacked(19, 32),     // a18
    unstacked(20, 32),     // a19
    unstacked(21, 32),     // a20
    unstacked(22, 32),     // a21
    unstacked(23, 32),     // a22
    unstacked(24, 32),     // a23
    unstacked(25, 32),     // a24
    unstacked(26, 32),     // a25
    unstacked(27, 32),     // a26
    unstacked(28, 32),     // a27
    unstacked(29, 32),     // a28
    unstacked(30, 32),     // a29
    unstacked(31, 32),     // a30
    unstacked(32, 32),     // a31
    unstacked(33, 32),     // a32
    unstacked(34, 32),     // a33
    unstacked(35, 32),     // a34
    unstacked(36, 32),     // a35
    unstacked(37, 32),     // a36
    unstacked(38, 32),     // a37
    unstacked(39, 32),     // a38
    unstacked(40, 32),     // a39
    unstacked(41, 32),     // a40
    unstacked(42, 32),     // a41
    unstacked(43, 32),     // a42
    unstacked(44, 32),     // a43
    unstacked(45, 32),     // a44
    unstacked(46, 32),     // a45
    unstacked(47, 32),     // a46
    unstacked(48, 32),     // a47
    unstacked(49, 32),     // a48
    unstacked(50, 32),     // a49
    unstacked(51, 32),     // a50
    unstacked(52, 32),     // a51
    unstacked(53, 32),     // a52
    unstacked(54, 32),     // a53
    unstacked(55, 32),     // a54
    unstacked(56, 32),     // a55
    unstacked(57, 32),     // a56
    unstacked(58, 32),     // a57
    unstacked(59, 32),     // a58
    unstacked(60, 32),     // a59
    unstacked(61, 32),     // a60
    unstacked(62, 32),     // a61
    unstacked(63, 32),     // a62
    unstacked(64, 32),     // a63
    stacked(65, 0x58, 32), // lbeg
    stacked(66, 0x5c, 32), // lend
    stacked(67, 0x60, 32), // lcount
    stacked(68, 0x48, 32), // sar
    unstacked(69, 32),     // windowbase
    unstacked(70, 32),     // windowstart
    unstacked(71, 32),     // configid0
    unstacked(72, 32),     // configid1
    stacked(73, 0x04, 32), // ps
    unstacked(74, 32),     // threadptr
    unstacked(75, 32),     // br
    stacked(76, 0x54, 32), // scompare1
    unstacked(77, 32),     // acclo
    unstacked(78, 32),     // acchi
    unstacked(79, 32),     // m0
    unstacked(80, 32),     // m1
    unstacked(81, 32),     // m2
    unstacked(82, 32),     // m3
    unstacked(83, 32),     // gpio_out
    unstacked(84, 32),     // f0
    unstacked(85, 32),     // f1
    unstacked(86, 32),     // f2
    unstacked(87, 32),     // f3
    unstacked(88, 32),     // f4
    unstacked(89, 32),     // f5
    unstacked(90, 32),     // f6
    unstacked(91, 32),     // f7
    unstacked(92, 32),     // f8
    unstacked(93, 32),     // f9
    unstacked(94, 32),     // f10
    unstacked(95, 32),     // f11
    unstacked(96, 32),     // f12
    unstacked(97, 32),     // f13
    unstacked(98, 32),     // f14
    unstacked(99, 32),     // f15
    unstacked(100, 32),    // fcr
    unstacked(101, 32),    // fsr
    unstacked(102, 32),    // accx_0
    unstacked(103, 32),    // accx_1
    unstacked(104, 32),    // qacc_h_0
    unstacked(105, 32),    // qacc_h_1
    unstacked(106, 32),    // qacc_h_2
    unstacked(107, 32),    // qacc_h_3
    unstacked(108, 32),    // qacc_h_4
    unstacked(109, 32),    // qacc_l_0
    unstacked(110, 32),    // qacc_l_1
    unstacked(111, 32),    // qacc_l_2
    unstacked(112, 32),    // qacc_l_3
    unstacked(113, 32),    // qacc_l_4
    unstacked(114, 32),    // sar_byte
    unstacked(115, 32),    // fft_bit_width
    unstacked(116, 32),    // ua_state_0
    unstacked(117, 32),    // ua_state_1
    unstacked(118, 32),    // ua_state_2
    unstacked(119, 32),    // ua_state_3
    unstacked(120, 32),    // q0
    unstacked(121, 32),    // q1
    unstacked(122, 32),    // q2
    unstacked(123, 32),    // q3
    unstacked(124, 32),    // q4
    unstacked(125, 32),    // q5
    unstacked(126, 32),    // q6
    unstacked(127, 32),    // q7
];

// Xtensa PS lives at byte 4 of every ESP frame layout.
const XTENSA_PS_OFFSET: usize = 4;

/// ESP32 NuttX stacking. Fixed frame layout, read in one bulk transfer.
pub const ESP32: Stacking = Stacking {
    frame_size: 26 * 4,
    growth: StackGrowth::Down,
    registers: &ESP32_REGISTERS,
    strategy: ReadStrategy::FixedLayout,
    fixup: Some(Fixup::ClearPsExcm { ps_offset: XTENSA_PS_OFFSET }),
    frame_align: Some(8),
};

/// ESP32-S2 NuttX stacking.
pub const ESP32S2: Stacking = Stacking {
    frame_size: 25 * 4,
    growth: StackGrowth::Down,
    registers: &ESP32S2_REGISTERS,
    strategy: ReadStrategy::FixedLayout,
    fixup: Some(Fixup::ClearPsExcm { ps_offset: XTENSA_PS_OFFSET }),
    frame_align: Some(8),
};

/// ESP32-S3 NuttX stacking.
pub const ESP32S3: Stacking = Stacking {
    frame_size: 26 * 4,
    growth: StackGrowth::Down,
    registers: &ESP32S3_REGISTERS,
    strategy: ReadStrategy::FixedLayout,
    fixup: Some(Fixup::ClearPsExcm { ps_offset: XTENSA_PS_OFFSET }),
    frame_align: Some(8),
};

/// Cores with a NuttX stacking descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetCore {
    /// Armv7-M / Armv8-M cores.
    CortexM,
    /// ESP32 (Xtensa LX6).
    Esp32,
    /// ESP32-S2 (Xtensa LX7, no FPU or loop option).
    Esp32S2,
    /// ESP32-S3 (Xtensa LX7).
    Esp32S3,
}

/// Stacking descriptor for `core`.
pub const fn stacking(core: TargetCore) -> &'static Stacking {
    match core {
        TargetCore::CortexM => &CORTEX_M,
        TargetCore::Esp32 => &ESP32,
        TargetCore::Esp32S2 => &ESP32S2,
        TargetCore::Esp32S3 => &ESP32S3,
    }
}
