//! SPECIAL (`op = 0`) instructions, dispatched by `func`.

use crate::decode::DecodedFields;
use crate::memory::MemoryImage;
use crate::opcodes::*;
use crate::registers::RegisterFile;
use crate::syscall::{self, HostIo, SyscallOutcome};
use crate::trap::Trap;
use crate::utils::interpret_u32_as_signed;

use super::StepOutcome;

pub fn execute(
    word: u32,
    fields: DecodedFields,
    regs: &mut RegisterFile,
    memory: &mut MemoryImage,
    io: &mut dyn HostIo,
) -> Result<StepOutcome, Trap> {
    match fields.func {
        SPE_SLL => {
            let value = regs.read(fields.rt) << fields.sa;
            regs.write(fields.rd, value);
        }
        SPE_SRL => {
            let value = regs.read(fields.rt) >> fields.sa;
            regs.write(fields.rd, value);
        }
        SPE_SRA => {
            let value = (interpret_u32_as_signed(regs.read(fields.rt)) >> fields.sa) as u32;
            regs.write(fields.rd, value);
        }
        SPE_SLLV => {
            let shift = regs.read(fields.rs) & 0x1F;
            regs.write(fields.rd, regs.read(fields.rt) << shift);
        }
        SPE_SRLV => {
            let shift = regs.read(fields.rs) & 0x1F;
            regs.write(fields.rd, regs.read(fields.rt) >> shift);
        }
        SPE_SRAV => {
            let shift = regs.read(fields.rs) & 0x1F;
            let value = interpret_u32_as_signed(regs.read(fields.rt)) >> shift;
            regs.write(fields.rd, value as u32);
        }
        SPE_JR => {
            regs.ip = regs.read(fields.rs);
        }
        SPE_JALR => {
            let link_target = regs.read(fields.rs);
            let link_register = if fields.rd == 0 { crate::registers::RA } else { fields.rd };
            regs.write(link_register, regs.ip);
            regs.ip = link_target;
        }
        SPE_SYSCALL => {
            return match syscall::dispatch(regs, memory, io)? {
                SyscallOutcome::Continue => Ok(StepOutcome::Continue),
                SyscallOutcome::Exit => Ok(StepOutcome::Exit),
            };
        }
        SPE_MFHI => regs.write(fields.rd, regs.hi),
        SPE_MTHI => regs.hi = regs.read(fields.rs),
        SPE_MFLO => regs.write(fields.rd, regs.lo),
        // The original source writes MTLO's operand into `hi`; fixed
        // here per spec.md §9 to write `lo`, matching the instruction's name.
        SPE_MTLO => regs.lo = regs.read(fields.rs),
        SPE_MULT => {
            let a = interpret_u32_as_signed(regs.read(fields.rs)) as i64;
            let b = interpret_u32_as_signed(regs.read(fields.rt)) as i64;
            let product = (a * b) as u64;
            regs.hi = (product >> 32) as u32;
            regs.lo = product as u32;
        }
        SPE_MULTU => {
            let a = regs.read(fields.rs) as u64;
            let b = regs.read(fields.rt) as u64;
            let product = a * b;
            regs.hi = (product >> 32) as u32;
            regs.lo = product as u32;
        }
        SPE_DIV => {
            let divisor = interpret_u32_as_signed(regs.read(fields.rt));
            if divisor != 0 {
                let dividend = interpret_u32_as_signed(regs.read(fields.rs));
                // wrapping_div/wrapping_rem, not `/`/`%`: i32::MIN / -1
                // overflows and i32's checked division operators panic
                // on it unconditionally (see rv32m::exec in the teacher).
                regs.lo = dividend.wrapping_div(divisor) as u32;
                regs.hi = dividend.wrapping_rem(divisor) as u32;
            }
        }
        SPE_DIVU => {
            let divisor = regs.read(fields.rt);
            if divisor != 0 {
                let dividend = regs.read(fields.rs);
                regs.lo = dividend / divisor;
                regs.hi = dividend % divisor;
            }
        }
        SPE_ADD => {
            let a = interpret_u32_as_signed(regs.read(fields.rs)) as i64;
            let b = interpret_u32_as_signed(regs.read(fields.rt)) as i64;
            let sum = a + b;
            if sum < i32::MIN as i64 || sum > i32::MAX as i64 {
                return Err(Trap::IntegerOverflow);
            }
            regs.write(fields.rd, sum as i32 as u32);
        }
        SPE_SUB => {
            let a = interpret_u32_as_signed(regs.read(fields.rs)) as i64;
            let b = interpret_u32_as_signed(regs.read(fields.rt)) as i64;
            let diff = a - b;
            if diff < i32::MIN as i64 || diff > i32::MAX as i64 {
                return Err(Trap::IntegerOverflow);
            }
            regs.write(fields.rd, diff as i32 as u32);
        }
        SPE_ADDU => {
            let value = regs.read(fields.rs).wrapping_add(regs.read(fields.rt));
            regs.write(fields.rd, value);
        }
        SPE_SUBU => {
            let value = regs.read(fields.rs).wrapping_sub(regs.read(fields.rt));
            regs.write(fields.rd, value);
        }
        SPE_AND => regs.write(fields.rd, regs.read(fields.rs) & regs.read(fields.rt)),
        SPE_OR => regs.write(fields.rd, regs.read(fields.rs) | regs.read(fields.rt)),
        SPE_XOR => regs.write(fields.rd, regs.read(fields.rs) ^ regs.read(fields.rt)),
        SPE_NOR => regs.write(fields.rd, !(regs.read(fields.rs) | regs.read(fields.rt))),
        SPE_SLT => {
            let taken = interpret_u32_as_signed(regs.read(fields.rs))
                < interpret_u32_as_signed(regs.read(fields.rt));
            regs.write(fields.rd, taken as u32);
        }
        SPE_SLTU => {
            let taken = regs.read(fields.rs) < regs.read(fields.rt);
            regs.write(fields.rd, taken as u32);
        }
        _ => return Err(Trap::InvalidInstruction(word)),
    }
    Ok(StepOutcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::memory::MEMORY_SIZE;
    use crate::registers::{RA, T0, T1, V0};
    use crate::syscall::ProcessIo;

    fn io() -> Box<dyn HostIo> {
        Box::new(ProcessIo)
    }

    #[test]
    fn add_computes_sum() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, 45);
        regs.write(T1, 15);
        let fields = decode(0x0109_1020); // add $v0, $t0, $t1
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.read(V0), 60);
    }

    #[test]
    fn add_overflow_traps_without_writing_rd() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, i32::MAX as u32);
        regs.write(T1, 1);
        regs.write(V0, 0xdead_beef);
        let fields = decode(0x0109_1020);
        let err = execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap_err();
        assert!(matches!(err, Trap::IntegerOverflow));
        assert_eq!(regs.read(V0), 0xdead_beef);
    }

    #[test]
    fn mult_produces_signed_64bit_product_in_hi_lo() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, 15);
        regs.write(T1, 10);
        let fields = decode(0x0109_1018); // mult $t0, $t1
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.lo, 150);
        assert_eq!(regs.hi, 0);
    }

    #[test]
    fn div_by_zero_leaves_hi_lo_unchanged() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.hi = 7;
        regs.lo = 9;
        regs.write(T0, 10);
        regs.write(T1, 0);
        let fields = decode(0x0109_001a); // div $t0, $t1
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.hi, 7);
        assert_eq!(regs.lo, 9);
    }

    #[test]
    fn div_of_int_min_by_minus_one_does_not_panic() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, i32::MIN as u32);
        regs.write(T1, (-1i32) as u32);
        let fields = decode(0x0109_001a); // div $t0, $t1
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.lo, i32::MIN as u32);
        assert_eq!(regs.hi, 0);
    }

    #[test]
    fn mtlo_writes_lo_not_hi() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, 42);
        let fields = decode(0x0100_0013); // mtlo $t0
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.lo, 42);
        assert_eq!(regs.hi, 0);
    }

    #[test]
    fn jr_jumps_to_register_value() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.write(T0, 64);
        let fields = decode(0x0100_0008); // jr $t0
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.ip, 64);
    }

    #[test]
    fn jalr_defaults_link_register_to_ra() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        regs.ip = 8;
        regs.write(T0, 64);
        let fields = decode(0x0100_0009); // jalr $t0 (rd defaults to 0 -> $ra)
        execute(0, fields, &mut regs, &mut mem, io.as_mut()).unwrap();
        assert_eq!(regs.read(RA), 8);
        assert_eq!(regs.ip, 64);
    }

    #[test]
    fn unrecognized_func_is_invalid_instruction() {
        let mut regs = RegisterFile::new();
        let mut mem = MemoryImage::new(MEMORY_SIZE);
        let mut io = io();
        let fields = decode(0x0000_003f); // func = 0x3f, unassigned
        let err = execute(0x0000_003f, fields, &mut regs, &mut mem, io.as_mut()).unwrap_err();
        assert!(matches!(err, Trap::InvalidInstruction(0x0000_003f)));
    }
}
