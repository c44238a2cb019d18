//! I-type arithmetic and `LUI`.

use crate::decode::DecodedFields;
use crate::opcodes::{
    OP_ADDI, OP_ADDIU, OP_ANDI, OP_LUI, OP_ORI, OP_SLTI, OP_SLTIU, OP_XORI,
};
use crate::registers::RegisterFile;
use crate::trap::Trap;
use crate::utils::{interpret_u32_as_signed, sign_extend};

use super::StepOutcome;

pub fn execute(
    word: u32,
    fields: DecodedFields,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, Trap> {
    match fields.op {
        OP_ADDI => {
            let a = interpret_u32_as_signed(regs.read(fields.rs)) as i64;
            let b = interpret_u32_as_signed(sign_extend(fields.imm, 15)) as i64;
            let sum = a + b;
            if sum < i32::MIN as i64 || sum > i32::MAX as i64 {
                return Err(Trap::IntegerOverflow);
            }
            regs.write(fields.rt, sum as i32 as u32);
        }
        OP_ADDIU => {
            // Zero-extends the immediate (diverges from real MIPS'
            // sign extension); preserved as specified.
            let sum = regs.read(fields.rs).wrapping_add(fields.imm as u32);
            regs.write(fields.rt, sum);
        }
        OP_SLTI => {
            let rs = interpret_u32_as_signed(regs.read(fields.rs));
            let imm = interpret_u32_as_signed(sign_extend(fields.imm, 15));
            regs.write(fields.rt, (rs < imm) as u32);
        }
        OP_SLTIU => {
            let rs = regs.read(fields.rs);
            let imm = fields.imm as u32;
            regs.write(fields.rt, (rs < imm) as u32);
        }
        OP_ANDI => regs.write(fields.rt, regs.read(fields.rs) & fields.imm as u32),
        OP_ORI => regs.write(fields.rt, regs.read(fields.rs) | fields.imm as u32),
        OP_XORI => regs.write(fields.rt, regs.read(fields.rs) ^ fields.imm as u32),
        OP_LUI => regs.write(fields.rt, (fields.imm as u32) << 16),
        _ => return Err(Trap::InvalidInstruction(word)),
    }
    Ok(StepOutcome::Continue)
}
