use crate::domain::{Game, Source};

/// Inline documents used as play targets, so the games work with no
/// network at all.
const SNAKE_URL: &str = "data:text/html,<html><body style=\"margin:0;display:flex;justify-content:center;align-items:center;height:100vh;background:#111;color:white;font-family:Arial;\"><div><h2>Classic Snake</h2><canvas id=\"c\" width=\"400\" height=\"400\" style=\"border:2px solid white;\"></canvas><p>Arrow keys to steer</p></div><script>const c=document.getElementById(\"c\"),g=c.getContext(\"2d\");let s=[{x:10,y:10}],d={x:1,y:0},f={x:15,y:10},over=false;document.onkeydown=e=>{if(e.key==\"ArrowUp\"&&d.y!=1)d={x:0,y:-1};if(e.key==\"ArrowDown\"&&d.y!=-1)d={x:0,y:1};if(e.key==\"ArrowLeft\"&&d.x!=1)d={x:-1,y:0};if(e.key==\"ArrowRight\"&&d.x!=-1)d={x:1,y:0}};setInterval(()=>{if(over)return;const h={x:s[0].x+d.x,y:s[0].y+d.y};if(h.x<0||h.y<0||h.x>19||h.y>19||s.some(p=>p.x==h.x&&p.y==h.y)){over=true;g.fillStyle=\"white\";g.font=\"24px Arial\";g.fillText(\"Game Over\",140,200);return}s.unshift(h);if(h.x==f.x&&h.y==f.y){f={x:Math.floor(Math.random()*20),y:Math.floor(Math.random()*20)}}else{s.pop()}g.fillStyle=\"#111\";g.fillRect(0,0,400,400);g.fillStyle=\"#0f0\";for(const p of s)g.fillRect(p.x*20,p.y*20,18,18);g.fillStyle=\"#f00\";g.fillRect(f.x*20,f.y*20,18,18)},120)</script></body></html>";

const TIC_TAC_TOE_URL: &str ="data:text/html,<html><body style=\"margin:0;display:flex;justify-content:center;align-items:center;height:100vh;background:#111;color:white;font-family:Arial;\"><div><h2>Tic Tac Toe</h2><div id=\"board\" style=\"display:grid;grid-template-columns:repeat(3,100px);gap:5px;\"></div></div><script>let turn=\"X\";const board=document.getElementById(\"board\");for(let i=0;i<9;i++){const cell=document.createElement(\"div\");cell.style.cssText=\"width:100px;height:100px;border:2px solid white;display:flex;align-items:center;justify-content:center;font-size:24px;cursor:pointer;\";cell.onclick=()=>{if(!cell.textContent){cell.textContent=turn;turn=turn==\"X\"?\"O\":\"X\"}};board.appendChild(cell)}</script></body></html>";

const SNAKE_THUMB: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"320\" height=\"240\" viewBox=\"0 0 320 240\"><rect width=\"320\" height=\"240\" fill=\"%23000\"/><text x=\"50%\" y=\"50%\" fill=\"%23fff\" text-anchor=\"middle\" font-size=\"24\">SNAKE</text></svg>";

const TIC_TAC_TOE_THUMB: &str = "data:image/svg+xml,<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"320\" height=\"240\" viewBox=\"0 0 320 240\"><rect width=\"320\" height=\"240\" fill=\"%23000\"/><text x=\"50%\" y=\"50%\" fill=\"%23fff\" text-anchor=\"middle\" font-size=\"24\">XO</text></svg>";

/// Hand-authored, fully self-contained games used only when live
/// aggregation produces nothing at all.
pub struct FallbackProvider;

impl FallbackProvider {
    pub fn seed() -> Vec<Game> {
        vec![
            Game {
                title: "Classic Snake".to_string(),
                source: Source::Fallback,
                source_id: None,
                play_url: SNAKE_URL.to_string(),
                category: "Arcade".to_string(),
                rating: 4.5,
                plays_label: "10M".to_string(),
                description: "Classic Snake game - eat the food and grow longer!".to_string(),
                tags: vec![
                    "Arcade".to_string(),
                    "Classic".to_string(),
                    "Snake".to_string(),
                    "Retro".to_string(),
                ],
                thumbnail_url: SNAKE_THUMB.to_string(),
                width: 800,
                height: 600,
                orientation: None,
                game_type: None,
                instructions: None,
            },
            Game {
                title: "Tic Tac Toe".to_string(),
                source: Source::Fallback,
                source_id: None,
                play_url: TIC_TAC_TOE_URL.to_string(),
                category: "Puzzle".to_string(),
                rating: 4.2,
                plays_label: "5M".to_string(),
                description: "Classic Tic Tac Toe game - get three in a row!".to_string(),
                tags: vec![
                    "Puzzle".to_string(),
                    "Classic".to_string(),
                    "Strategy".to_string(),
                    "Two Player".to_string(),
                ],
                thumbnail_url: TIC_TAC_TOE_THUMB.to_string(),
                width: 800,
                height: 600,
                orientation: None,
                game_type: None,
                instructions: None,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_at_least_two_self_contained_games() {
        let games = FallbackProvider::seed();
        assert!(games.len() >= 2);
        for game in &games {
            assert!(
                game.play_url.starts_with("data:"),
                "{} needs the network to play: {}",
                game.title,
                game.play_url
            );
            assert!(game.thumbnail_url.starts_with("data:"));
            assert_eq!(game.source, Source::Fallback);
            assert!((0.0..=5.0).contains(&game.rating));
            assert_eq!(game.tags.len(), 4);
        }
    }

    #[test]
    fn seed_titles_are_unique() {
        let games = FallbackProvider::seed();
        let mut titles: Vec<&str> = games.iter().map(|g| g.title.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), games.len());
    }
}
