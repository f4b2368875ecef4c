pub const APP_CSS: &str = r#"
:root {
    --color-bg-primary: #111827;
    --color-bg-secondary: #1f2937;
    --color-bg-overlay: rgba(0, 0, 0, 0.8);
    --color-text-primary: #f3f4f6;
    --color-text-muted: #9ca3af;
    --color-border: #374151;
    --color-accent: #a855f7;
    --color-accent-soft: #d8b4fe;
    --color-chat-user-bg: #2563eb;
    --color-chat-assistant-bg: #1f2937;
    --color-error-text: #f87171;
    --color-error-bg: rgba(127, 29, 29, 0.5);
    font-size: 15px;
}
* { box-sizing: border-box; }
body { margin: 0; background: var(--color-bg-primary); color: var(--color-text-primary); font-family: system-ui, sans-serif; }
.hstack { display: flex; flex-direction: row; }
.text-muted { color: var(--color-text-muted); font-size: 0.875rem; }

.header { background: var(--color-bg-secondary); padding: 1rem; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.4); }
.header-content { display: flex; align-items: center; justify-content: space-between; }
.header-title { margin: 0; font-size: 1.2rem; }
.header-link { color: var(--color-accent-soft); font-size: 0.85rem; text-decoration: none; }
.header-link:hover { text-decoration: underline; }

.btn { border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 0.5rem 1rem; color: var(--color-text-primary); background: transparent; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.btn-primary { background: var(--color-accent); border-color: var(--color-accent); }
.btn-ghost:hover { background: var(--color-border); }
.mic.listening { background: #dc2626; border-color: #dc2626; }

.main-container { display: flex; flex-direction: column; height: calc(100vh - 5rem); }
.chat-wrap { flex: 1; overflow-y: auto; padding: 1rem 1.5rem; }
.chat-list { display: flex; flex-direction: column; gap: 1.25rem; max-width: 56rem; margin: 0 auto; }
.message-row { display: flex; gap: 0.75rem; align-items: flex-start; }
.message-row.user { justify-content: flex-end; }
.message-stack { max-width: 36rem; }
.avatar { width: 2.25rem; height: 2.25rem; border-radius: 50%; background: var(--color-accent); display: flex; align-items: center; justify-content: center; flex-shrink: 0; }
.avatar.large { width: 3rem; height: 3rem; font-size: 1.5rem; }
.bubble { padding: 0.75rem 1rem; border-radius: 1rem; }
.bubble.user { background: var(--color-chat-user-bg); border-bottom-right-radius: 0; }
.bubble.assistant { background: var(--color-chat-assistant-bg); border-bottom-left-radius: 0; }
.bubble .plain { margin: 0; white-space: pre-wrap; }
.md p:first-child { margin-top: 0; }
.md p:last-child { margin-bottom: 0; }

.diagram { position: relative; margin-bottom: 0.5rem; }
.diagram img { max-width: 100%; border-radius: 0.5rem; border: 1px solid var(--color-border); cursor: zoom-in; }
.diagram-download { position: absolute; top: 0.5rem; right: 0.5rem; background: rgba(17, 24, 39, 0.7); color: var(--color-text-primary); border-radius: 999px; padding: 0.25rem 0.75rem; font-size: 0.8rem; text-decoration: none; }

.suggestions { margin-left: 3rem; }
.suggestion-list { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.tag-pill { color: var(--color-accent-soft); background: var(--color-bg-secondary); border: 1px solid var(--color-border); border-radius: 999px; padding: 0.4rem 1rem; cursor: pointer; }
.tag-pill:hover { border-color: var(--color-accent); }

.shimmer-line { background: var(--color-bg-secondary); border-radius: 0.5rem; padding: 0.75rem; }
.shimmer-text { font-style: italic; color: var(--color-text-muted); }

.error-banner { padding: 0.5rem 1rem; text-align: center; font-size: 0.875rem; color: var(--color-error-text); background: var(--color-error-bg); }

.composer { padding: 1rem; border-top: 1px solid var(--color-border); background: rgba(31, 41, 55, 0.5); }
.composer-inner { max-width: 56rem; margin: 0 auto; }
.composer input { flex: 1; background: #374151; border: 1px solid #4b5563; border-radius: 999px; padding: 0.75rem 1.25rem; color: var(--color-text-primary); }
.composer input:focus { outline: none; border-color: var(--color-accent); }

.image-overlay { position: fixed; inset: 0; z-index: 50; background: var(--color-bg-overlay); display: flex; align-items: center; justify-content: center; padding: 1rem; }
.image-zoomed { max-width: 100%; max-height: 100%; object-fit: contain; cursor: zoom-out; }
.image-close { position: absolute; top: 1rem; right: 1rem; }
"#;
