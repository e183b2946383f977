//! Mouse input dispatch for game automation.
//!
//! Emits a single hardware-level left click at the current cursor position
//! via SendInput. Whatever window holds foreground focus receives the
//! event; the caller owns focus discipline. Fire-and-forget: there is no
//! retry and no error channel.

#[cfg(windows)]
pub fn send_click() {
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
        MOUSEINPUT,
    };

    let press_release = [
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dwFlags: MOUSEEVENTF_LEFTDOWN,
                    ..Default::default()
                },
            },
        },
        INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dwFlags: MOUSEEVENTF_LEFTUP,
                    ..Default::default()
                },
            },
        },
    ];

    unsafe {
        let sent = SendInput(&press_release, std::mem::size_of::<INPUT>() as i32);
        if sent != press_release.len() as u32 {
            tracing::debug!("SendInput delivered {sent}/2 click events");
        }
    }
}

#[cfg(not(windows))]
pub fn send_click() {
    tracing::debug!("click dispatch is a no-op off Windows");
}
