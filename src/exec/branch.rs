//! Jumps and branches: `J`, `JAL`, REGIMM (`BLTZ`/`BGEZ`), and the
//! conditional branch family (`BEQ`/`BNE`/`BLEZ`/`BGTZ`).

use crate::decode::DecodedFields;
use crate::opcodes::{OP_BEQ, OP_BGTZ, OP_BLEZ, OP_BNE, RT_BGEZ, RT_BLTZ};
use crate::registers::{RegisterFile, RA};
use crate::trap::Trap;
use crate::utils::{interpret_u32_as_signed, sign_extend};

use super::StepOutcome;

/// `J target`: `ip <- jt << 2`, unconditionally and without reference
/// to the current `ip` (this is an absolute reset of the relative
/// offset, not a displacement).
pub fn jump(fields: DecodedFields, regs: &mut RegisterFile) {
    regs.ip = fields.jt << 2;
}

/// `JAL target`: save the post-fetch `ip` (the return address) into
/// `$ra`, then jump exactly as `J` does.
pub fn jump_and_link(fields: DecodedFields, regs: &mut RegisterFile) {
    regs.write(RA, regs.ip);
    regs.ip = fields.jt << 2;
}

/// Branch displacement shared by REGIMM and the conditional branch
/// family: `ip <- ip + (sign_extend(imm) << 2) - 4`, where `ip` is
/// already the post-fetch value. The `-4` compensates for fetch
/// having advanced `ip` by 4 already, so that with no delay slot the
/// net displacement from the branch's own address is exactly the
/// scaled immediate (spec.md §4.4, §8).
fn take_branch(fields: DecodedFields, regs: &mut RegisterFile) {
    let offset = sign_extend(fields.imm, 15) << 2;
    regs.ip = regs.ip.wrapping_add(offset).wrapping_sub(4);
}

/// REGIMM (`op = 1`), dispatched by `rt`: `BLTZ` (rt=0), `BGEZ` (rt=1).
pub fn regimm(
    word: u32,
    fields: DecodedFields,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, Trap> {
    let rs = interpret_u32_as_signed(regs.read(fields.rs));
    let taken = match fields.rt {
        RT_BLTZ => rs < 0,
        RT_BGEZ => rs >= 0,
        _ => return Err(Trap::InvalidInstruction(word)),
    };
    if taken {
        take_branch(fields, regs);
    }
    Ok(StepOutcome::Continue)
}

/// `BEQ`, `BNE`, `BLEZ`, `BGTZ`.
///
/// `BGTZ`'s condition is `regs[rs] > 0` (strictly greater). The
/// original source used `>= 0`, which duplicates `BGEZ`; that's fixed
/// here per spec.md §9.
pub fn conditional(
    op: u8,
    fields: DecodedFields,
    regs: &mut RegisterFile,
) -> Result<StepOutcome, Trap> {
    let taken = match op {
        OP_BEQ => regs.read(fields.rs) == regs.read(fields.rt),
        OP_BNE => regs.read(fields.rs) != regs.read(fields.rt),
        OP_BLEZ => interpret_u32_as_signed(regs.read(fields.rs)) <= 0,
        OP_BGTZ => interpret_u32_as_signed(regs.read(fields.rs)) > 0,
        _ => unreachable!("conditional() called with non-branch opcode"),
    };
    if taken {
        take_branch(fields, regs);
    }
    Ok(StepOutcome::Continue)
}
