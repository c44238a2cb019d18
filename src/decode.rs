//! Instruction decoder.
//!
//! Splits a fetched 32-bit word into every field a Lite MIPS opcode
//! might need. Field positions are fixed across all three MIPS
//! encoding families (R/I/J), so unlike a variable-width ISA, eager
//! extraction of every field up front (rather than per-family newtypes)
//! is both simpler and cheap. The decoder never fails: classification
//! is entirely the executor's job, by `op` (and `func`/`rt` beneath it).

use crate::utils::extract_field;

/// Every field of a 32-bit Lite MIPS instruction word.
#[derive(Debug, Clone, Copy)]
pub struct DecodedFields {
    /// Primary opcode, instr[31:26].
    pub op: u8,
    /// Source register index, instr[25:21].
    pub rs: u8,
    /// Target register index, instr[20:16].
    pub rt: u8,
    /// Destination register index (R-type), instr[15:11].
    pub rd: u8,
    /// Shift amount (R-type shifts), instr[10:6].
    pub sa: u8,
    /// Secondary opcode when op = SPECIAL, instr[5:0].
    pub func: u8,
    /// Immediate field (I-type), instr[15:0].
    pub imm: u16,
    /// Jump target field (J-type), instr[25:0].
    pub jt: u32,
}

/// Decode a 32-bit instruction word into its constituent fields.
pub fn decode(word: u32) -> DecodedFields {
    DecodedFields {
        op: extract_field(word, 31, 26) as u8,
        rs: extract_field(word, 25, 21) as u8,
        rt: extract_field(word, 20, 16) as u8,
        rd: extract_field(word, 15, 11) as u8,
        sa: extract_field(word, 10, 6) as u8,
        func: extract_field(word, 5, 0) as u8,
        imm: extract_field(word, 15, 0) as u16,
        jt: extract_field(word, 25, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes::{OP_ADDI, SPE_ADD};

    #[test]
    fn decode_rtype_add() {
        // add $v0, $t0, $t1 -> op=0 rs=$t0(8) rt=$t1(9) rd=$v0(2) sa=0 func=SPE_ADD
        let word = 0x0109_1020;
        let fields = decode(word);
        assert_eq!(fields.op, 0);
        assert_eq!(fields.rs, 8);
        assert_eq!(fields.rt, 9);
        assert_eq!(fields.rd, 2);
        assert_eq!(fields.sa, 0);
        assert_eq!(fields.func, SPE_ADD);
    }

    #[test]
    fn decode_itype_addi() {
        // addi $t1, $t0, 100 -> op=ADDI rs=$t0(8) rt=$t1(9) imm=100
        let word = 0x2109_0064;
        let fields = decode(word);
        assert_eq!(fields.op, OP_ADDI);
        assert_eq!(fields.rs, 8);
        assert_eq!(fields.rt, 9);
        assert_eq!(fields.imm, 100);
    }

    #[test]
    fn decode_jtype_extracts_26bit_target() {
        // j 3 -> op=2 jt=3
        let word = 0x0800_0003;
        let fields = decode(word);
        assert_eq!(fields.op, 0x02);
        assert_eq!(fields.jt, 3);
    }
}
