use crate::constants::{FLAG_REGISTER, FONT_GLYPH_SIZE, KEY_COUNT, STACK_SIZE};
use crate::error::Fault;
use crate::random::RandomSource;
use crate::state::{pixel_index, State};

/// Result of every operation; guards fail before anything is mutated.
pub type Outcome = Result<(), Fault>;

fn next(state: &mut State) -> Outcome {
    state.pc = state.pc.wrapping_add(0x2);
    Ok(())
}

fn skip_if(state: &mut State, condition: bool) -> Outcome {
    let step = if condition { 0x4 } else { 0x2 };
    state.pc = state.pc.wrapping_add(step);
    Ok(())
}

/// clear
pub fn clr(state: &mut State) -> Outcome {
    state.frame_buffer.fill(0);
    state.draw_flag = true;
    next(state)
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself, so step past it.
pub fn rts(state: &mut State) -> Outcome {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow);
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp].wrapping_add(0x2);
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Outcome {
    state.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Outcome {
    if state.sp >= STACK_SIZE {
        return Err(Fault::StackOverflow);
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: usize, kk: u8) -> Outcome {
    let condition = state.v[x] == kk;
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: usize, kk: u8) -> Outcome {
    let condition = state.v[x] != kk;
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) -> Outcome {
    let condition = state.v[x] == state.v[y];
    skip_if(state, condition)
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) -> Outcome {
    state.v[x] = kk;
    next(state)
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(state: &mut State, x: usize, kk: u8) -> Outcome {
    state.v[x] = state.v[x].wrapping_add(kk);
    next(state)
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) -> Outcome {
    state.v[x] = state.v[y];
    next(state)
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) -> Outcome {
    state.v[x] |= state.v[y];
    next(state)
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) -> Outcome {
    state.v[x] &= state.v[y];
    next(state)
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) -> Outcome {
    state.v[x] ^= state.v[y];
    next(state)
}

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: usize, y: usize) -> Outcome {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.v[FLAG_REGISTER] = u8::from(over);
    next(state)
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: usize, y: usize) -> Outcome {
    let (res, under) = state.v[x].overflowing_sub(state.v[y]);
    state.v[x] = res;
    state.v[FLAG_REGISTER] = u8::from(!under);
    next(state)
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: usize) -> Outcome {
    state.v[FLAG_REGISTER] = state.v[x] & 0x1;
    state.v[x] >>= 1;
    next(state)
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: usize, y: usize) -> Outcome {
    let (res, under) = state.v[y].overflowing_sub(state.v[x]);
    state.v[x] = res;
    state.v[FLAG_REGISTER] = u8::from(!under);
    next(state)
}

/// Vx <<= 1; VF = lsb
/// The flag takes the low bit, not the bit shifted out.
pub fn shl(state: &mut State, x: usize) -> Outcome {
    state.v[FLAG_REGISTER] = state.v[x] & 0x1;
    state.v[x] <<= 1;
    next(state)
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: usize, y: usize) -> Outcome {
    let condition = state.v[x] != state.v[y];
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Outcome {
    state.i = addr;
    next(state)
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) -> Outcome {
    state.pc = u16::from(state.v[0x0]).wrapping_add(addr);
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, rng: &mut impl RandomSource, x: usize, kk: u8) -> Outcome {
    state.v[x] = rng.next_byte() & kk;
    next(state)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Outcome {
    let sprite = state.memory_range(state.i, n as usize)?;
    let origin_x = state.v[x] as usize;
    let origin_y = state.v[y] as usize;

    let mut collision = 0x0;
    for (row, address) in sprite.enumerate() {
        let byte = state.memory[address];
        for bit in 0..8 {
            let pixel_value = (byte >> (7 - bit)) & 0x1;
            let index = pixel_index(origin_x + bit, origin_y + row);
            collision |= pixel_value & state.frame_buffer[index];
            state.frame_buffer[index] ^= pixel_value;
        }
    }

    state.v[FLAG_REGISTER] = collision;
    state.draw_flag = true;
    next(state)
}

fn key_pressed(state: &State, word: u16, x: usize) -> Result<bool, Fault> {
    let key = state.v[x] as usize;
    if key >= KEY_COUNT {
        return Err(Fault::MalformedOperand { word });
    }
    Ok(state.keypad[key] != 0)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, word: u16, x: usize) -> Outcome {
    let condition = key_pressed(state, word, x)?;
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, word: u16, x: usize) -> Outcome {
    let condition = !key_pressed(state, word, x)?;
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) -> Outcome {
    state.v[x] = state.delay_timer;
    next(state)
}

/// await keypress for Vx
/// Without a pressed key the pc stays put, so this runs again next cycle.
pub fn keyd(state: &mut State, x: usize) -> Outcome {
    match state.keypad.iter().position(|&key| key != 0) {
        Some(key) => {
            state.v[x] = key as u8;
            next(state)
        }
        None => Ok(()),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: usize) -> Outcome {
    state.delay_timer = state.v[x];
    next(state)
}

/// ST = Vx
pub fn ld(state: &mut State, x: usize) -> Outcome {
    state.sound_timer = state.v[x];
    next(state)
}

/// I += Vx; VF = I + Vx > 0xFF
/// The carry is measured against a byte even though I is wider.
pub fn addi(state: &mut State, x: usize) -> Outcome {
    let res = u32::from(state.i) + u32::from(state.v[x]);
    state.i = res as u16;
    state.v[FLAG_REGISTER] = u8::from(res > 0xFF);
    next(state)
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: usize) -> Outcome {
    state.i = u16::from(state.v[x]) * FONT_GLYPH_SIZE;
    next(state)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: usize) -> Outcome {
    let range = state.memory_range(state.i, 3)?;
    let value = state.v[x];
    state.memory[range].copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
    next(state)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) -> Outcome {
    let range = state.memory_range(state.i, x + 1)?;
    state.memory[range].copy_from_slice(&state.v[0x0..=x]);
    next(state)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) -> Outcome {
    let range = state.memory_range(state.i, x + 1)?;
    state.v[0x0..=x].copy_from_slice(&state.memory[range]);
    next(state)
}
