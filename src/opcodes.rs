//! Named opcode and function-code constants for Lite MIPS.
//!
//! Mirrors the layout of the original `lmips_opcodes.h`, extended with
//! a handful of standard MIPS-I opcodes (`LUI`, `SW`) the original
//! header omitted but spec.md's executor requires.

// Primary opcodes (instr[31:26])
pub const OP_SPECIAL: u8 = 0x00;
pub const OP_REGIMM: u8 = 0x01;
pub const OP_J: u8 = 0x02;
pub const OP_JAL: u8 = 0x03;
pub const OP_BEQ: u8 = 0x04;
pub const OP_BNE: u8 = 0x05;
pub const OP_BLEZ: u8 = 0x06;
pub const OP_BGTZ: u8 = 0x07;
pub const OP_ADDI: u8 = 0x08;
pub const OP_ADDIU: u8 = 0x09;
pub const OP_SLTI: u8 = 0x0A;
pub const OP_SLTIU: u8 = 0x0B;
pub const OP_ANDI: u8 = 0x0C;
pub const OP_ORI: u8 = 0x0D;
pub const OP_XORI: u8 = 0x0E;
pub const OP_LUI: u8 = 0x0F;
pub const OP_LB: u8 = 0x20;
pub const OP_LH: u8 = 0x21;
pub const OP_LW: u8 = 0x23;
pub const OP_LBU: u8 = 0x24;
pub const OP_LHU: u8 = 0x25;
pub const OP_SB: u8 = 0x28;
pub const OP_SH: u8 = 0x29;
pub const OP_SW: u8 = 0x2B;

// SPECIAL (op = 0) function codes (instr[5:0])
pub const SPE_SLL: u8 = 0x00;
pub const SPE_SRL: u8 = 0x02;
pub const SPE_SRA: u8 = 0x03;
pub const SPE_SLLV: u8 = 0x04;
pub const SPE_SRLV: u8 = 0x06;
pub const SPE_SRAV: u8 = 0x07;
pub const SPE_JR: u8 = 0x08;
pub const SPE_JALR: u8 = 0x09;
// Lite MIPS reassigns 0x0D to SYSCALL rather than the standard MIPS-I
// 0x0C (which the original header leaves to BREAK, unused here).
pub const SPE_SYSCALL: u8 = 0x0D;
pub const SPE_MFHI: u8 = 0x10;
pub const SPE_MTHI: u8 = 0x11;
pub const SPE_MFLO: u8 = 0x12;
pub const SPE_MTLO: u8 = 0x13;
pub const SPE_MULT: u8 = 0x18;
pub const SPE_MULTU: u8 = 0x19;
pub const SPE_DIV: u8 = 0x1A;
pub const SPE_DIVU: u8 = 0x1B;
pub const SPE_ADD: u8 = 0x20;
pub const SPE_ADDU: u8 = 0x21;
pub const SPE_SUB: u8 = 0x22;
pub const SPE_SUBU: u8 = 0x23;
pub const SPE_AND: u8 = 0x24;
pub const SPE_OR: u8 = 0x25;
pub const SPE_XOR: u8 = 0x26;
pub const SPE_NOR: u8 = 0x27;
pub const SPE_SLT: u8 = 0x2A;
pub const SPE_SLTU: u8 = 0x2B;

// REGIMM (op = 1) rt-field codes
pub const RT_BLTZ: u8 = 0x00;
pub const RT_BGEZ: u8 = 0x01;

// Syscall selectors ($v0)
pub const SYS_PRINT_INT: u32 = 1;
pub const SYS_PRINT_STRING: u32 = 4;
pub const SYS_READ_INT: u32 = 5;
pub const SYS_READ_STRING: u32 = 8;
pub const SYS_SBRK: u32 = 9;
pub const SYS_EXIT: u32 = 16;
