use vm8_core::constants::DISPLAY_WIDTH;
use vm8_core::FrameBuffer;

const LIT: char = '#';
const DARK: char = '.';

/// Formats a FrameBuffer as text for printing to a terminal.
///
/// Each row of the display becomes one line, with `#` for lit pixels and `.` for dark ones.
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .chunks(DISPLAY_WIDTH)
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 0 { DARK } else { LIT })
                .chain(std::iter::once('\n'))
                .collect::<String>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vm8_core::constants::DISPLAY_HEIGHT;

    #[test]
    fn test_frame_to_text() {
        let mut frame: FrameBuffer = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        frame[0..2].copy_from_slice(&[0, 1]);
        frame[DISPLAY_WIDTH..DISPLAY_WIDTH + 2].copy_from_slice(&[1, 0]);
        let text = frame_to_text(&frame);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with(".#."));
        assert!(lines[1].starts_with("#.."));
        assert!(lines.iter().all(|line| line.len() == DISPLAY_WIDTH));
    }
}
