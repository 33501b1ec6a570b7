use crate::config::{IndexOverflow, SpriteBounds};
use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG, FONT_ADDR, FONT_SPRITE_SIZE, STACK_DEPTH,
};
use crate::cpu::{Cpu, Flow};
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::memory::Memory;
use crate::opcode::Opcode;

/// clear
pub fn cls(_op: &dyn Opcode, _cpu: &mut Cpu, _mem: &mut Memory, display: &mut Display) -> Result<Flow> {
    display.clear();
    Ok(Flow::Next)
}

/// PC = STACK.pop()
pub fn rts(_op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    if cpu.sp == 0 {
        return Err(Chip8Error::StackUnderflow { pc: cpu.pc });
    }
    cpu.sp -= 1;
    Ok(Flow::Jump(cpu.stack[cpu.sp as usize]))
}

/// PC = NNN
pub fn jump(op: &dyn Opcode, _cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    Ok(Flow::Jump(op.nnn()))
}

/// STACK.push(PC + 2); PC = NNN
pub fn call(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    if cpu.sp as usize >= STACK_DEPTH {
        return Err(Chip8Error::StackOverflow { pc: cpu.pc });
    }
    cpu.stack[cpu.sp as usize] = cpu.pc.wrapping_add(2);
    cpu.sp += 1;
    Ok(Flow::Jump(op.nnn()))
}

fn skip_if(condition: bool) -> Result<Flow> {
    Ok(if condition { Flow::Skip } else { Flow::Next })
}

/// if Vx == NN then skip
pub fn ske(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(cpu.v[op.x()] == op.nn())
}

/// if Vx != NN then skip
pub fn skne(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(cpu.v[op.x()] != op.nn())
}

/// if Vx == Vy then skip
pub fn skre(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(cpu.v[op.x()] == cpu.v[op.y()])
}

/// if Vx != Vy then skip
pub fn skrne(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(cpu.v[op.x()] != cpu.v[op.y()])
}

/// Vx = NN
pub fn load(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] = op.nn();
    Ok(Flow::Next)
}

/// Vx += NN
/// Wraps at 256; VF is not affected
pub fn add(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] = cpu.v[op.x()].wrapping_add(op.nn());
    Ok(Flow::Next)
}

/// Vx = Vy
pub fn mv(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] = cpu.v[op.y()];
    Ok(Flow::Next)
}

/// Vx |= Vy
pub fn or(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] |= cpu.v[op.y()];
    Ok(Flow::Next)
}

/// Vx &= Vy
pub fn and(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] &= cpu.v[op.y()];
    Ok(Flow::Next)
}

/// Vx ^= Vy
pub fn xor(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] ^= cpu.v[op.y()];
    Ok(Flow::Next)
}

// The arithmetic ops below write VF after Vx, so the flag wins when x == 0xF.

/// Vx += Vy; VF = overflow
pub fn addr(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let (res, over) = cpu.v[op.x()].overflowing_add(cpu.v[op.y()]);
    cpu.v[op.x()] = res;
    cpu.v[FLAG] = over as u8;
    Ok(Flow::Next)
}

/// Vx -= Vy; VF = !underflow
pub fn sub(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let (res, under) = cpu.v[op.x()].overflowing_sub(cpu.v[op.y()]);
    cpu.v[op.x()] = res;
    cpu.v[FLAG] = !under as u8;
    Ok(Flow::Next)
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let (res, under) = cpu.v[op.y()].overflowing_sub(cpu.v[op.x()]);
    cpu.v[op.x()] = res;
    cpu.v[FLAG] = !under as u8;
    Ok(Flow::Next)
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let lsb = cpu.v[op.x()] & 0x1;
    cpu.v[op.x()] >>= 1;
    cpu.v[FLAG] = lsb;
    Ok(Flow::Next)
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let msb = cpu.v[op.x()] >> 7;
    cpu.v[op.x()] <<= 1;
    cpu.v[FLAG] = msb;
    Ok(Flow::Next)
}

/// I = NNN
pub fn loadi(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.i = op.nnn();
    Ok(Flow::Next)
}

/// PC = V0 + NNN
pub fn jumpi(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    Ok(Flow::Jump(u16::from(cpu.v[0x0]) + op.nnn()))
}

/// Vx = rand_byte & NN
pub fn rand(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let rand_byte: u8 = rand::random();
    cpu.v[op.x()] = rand_byte & op.nn();
    Ok(Flow::Next)
}

/// draw_sprite(x=Vx y=Vy size=N)
/// XORs the sprite stored at mem[I..I+N] onto the display at (Vx, Vy).
/// Each byte is one row, bit 7 being the leftmost pixel. VF = 1 if any lit pixel was turned off.
///
/// Pixels past the display edges are handled according to `Config::sprite_bounds`.
/// Every coordinate is resolved before the first toggle so a fault leaves the display as it was.
pub fn draw(op: &dyn Opcode, cpu: &mut Cpu, mem: &mut Memory, display: &mut Display) -> Result<Flow> {
    let sprite = mem.read(cpu.i, op.n() as usize)?;
    let origin_x = cpu.v[op.x()] as usize;
    let origin_y = cpu.v[op.y()] as usize;

    let mut pixels = Vec::with_capacity(sprite.len() * 8);
    for (row, &byte) in sprite.iter().enumerate() {
        for column in 0..8 {
            if (byte >> (7 - column)) & 1 == 0 {
                continue;
            }
            if let Some(pixel) = place(cpu.config.sprite_bounds, origin_x + column, origin_y + row)? {
                pixels.push(pixel);
            }
        }
    }

    // Reset the flag register (used for collision detection)
    cpu.v[FLAG] = 0x0;
    for (x, y) in pixels {
        if display.toggle(x, y) {
            cpu.v[FLAG] = 0x1;
        }
    }
    display.mark_dirty();
    Ok(Flow::Next)
}

/// Map a sprite pixel onto the display, or decide that it doesn't land on it
fn place(bounds: SpriteBounds, x: usize, y: usize) -> Result<Option<(usize, usize)>> {
    let inside = x < DISPLAY_WIDTH && y < DISPLAY_HEIGHT;
    match bounds {
        SpriteBounds::Wrap => Ok(Some((x % DISPLAY_WIDTH, y % DISPLAY_HEIGHT))),
        SpriteBounds::Clip if inside => Ok(Some((x, y))),
        SpriteBounds::Clip => Ok(None),
        SpriteBounds::Fault if inside => Ok(Some((x, y))),
        SpriteBounds::Fault => Err(Chip8Error::SpriteOutOfBounds { x, y }),
    }
}

/// if keys[Vx] is pressed then skip
pub fn skpr(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(cpu.keys[(cpu.v[op.x()] & 0xF) as usize])
}

/// if keys[Vx] is not pressed then skip
pub fn skup(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    skip_if(!cpu.keys[(cpu.v[op.x()] & 0xF) as usize])
}

/// Vx = DT
pub fn moved(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.v[op.x()] = cpu.delay_timer.get();
    Ok(Flow::Next)
}

/// await keypress for Vx
/// The machine stops fetching until `key_press` delivers a key into Vx
pub fn keyd(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.waiting_for_key = Some(op.x());
    Ok(Flow::Next)
}

/// DT = Vx
pub fn loads(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.delay_timer.set(cpu.v[op.x()]);
    Ok(Flow::Next)
}

/// ST = Vx
pub fn ld(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.sound_timer = cpu.v[op.x()];
    Ok(Flow::Next)
}

/// I += Vx
/// Wraps at 16 bits. Only sets VF when configured with `IndexOverflow::SetFlag`
pub fn addi(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let sum = u32::from(cpu.i) + u32::from(cpu.v[op.x()]);
    cpu.i = sum as u16;
    if cpu.config.index_overflow == IndexOverflow::SetFlag {
        cpu.v[FLAG] = (sum > 0x0FFF) as u8;
    }
    Ok(Flow::Next)
}

/// I = FONT_ADDR + Vx * 5
/// Points I at the sprite for the hex digit in the low nibble of Vx
pub fn ldspr(op: &dyn Opcode, cpu: &mut Cpu, _mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    cpu.i = FONT_ADDR + u16::from(cpu.v[op.x()] & 0xF) * FONT_SPRITE_SIZE;
    Ok(Flow::Next)
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: &dyn Opcode, cpu: &mut Cpu, mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let value = cpu.v[op.x()];
    mem.write(cpu.i, &[value / 100, value / 10 % 10, value % 10])?;
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is left unchanged
pub fn stor(op: &dyn Opcode, cpu: &mut Cpu, mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    mem.write(cpu.i, &cpu.v[..=op.x()])?;
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
/// I itself is left unchanged
pub fn read(op: &dyn Opcode, cpu: &mut Cpu, mem: &mut Memory, _display: &mut Display) -> Result<Flow> {
    let values = mem.read(cpu.i, op.x() + 1)?;
    cpu.v[..=op.x()].copy_from_slice(values);
    Ok(Flow::Next)
}
